//! JSON file storage implementation.
//!
//! Stores each collection as a single JSON array under a root directory
//! (`swimming_times.json`, `workouts.json`, `goals.json`). A missing file
//! reads as an empty collection; a corrupt one is reported as an error rather
//! than silently dropped.

use std::path::{Path, PathBuf};
use aquatrack_core::{Goal, GoalId, PerformanceRecord, RecordId, Workout, WorkoutId};
use serde::{de::DeserializeOwned, Serialize};
use tokio::fs;
use tracing::{debug, info, warn};
use super::trait_::{replace_keyed, Keyed};
use super::{Result, Storage};

const TIMES_FILE: &str = "swimming_times.json";
const WORKOUTS_FILE: &str = "workouts.json";
const GOALS_FILE: &str = "goals.json";

/// File-based JSON storage backend.
pub struct JsonStorage {
    root: PathBuf,
}

impl JsonStorage {
    /// Create storage rooted at `root`, creating the directory if needed.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).await?;
        info!(root = %root.display(), "Opened JSON storage");
        Ok(Self { root })
    }

    /// Root directory of this store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path(&self, file: &str) -> PathBuf {
        self.root.join(file)
    }

    async fn read<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>> {
        read_collection(&self.path(file)).await
    }

    async fn write<T: Serialize>(&self, file: &str, items: &[T]) -> Result<()> {
        write_collection(&self.path(file), items).await
    }

    async fn insert<T>(&self, file: &str, item: &T) -> Result<()>
    where
        T: Keyed + Clone + Serialize + DeserializeOwned,
    {
        let mut items: Vec<T> = self.read(file).await?;
        items.push(item.clone());
        self.write(file, &items).await?;
        debug!(file, id = %item.key(), "Saved item");
        Ok(())
    }

    async fn replace<T>(&self, file: &str, item: &T, kind: &str) -> Result<()>
    where
        T: Keyed + Clone + Serialize + DeserializeOwned,
    {
        let mut items: Vec<T> = self.read(file).await?;
        replace_keyed(&mut items, item, kind)?;
        self.write(file, &items).await
    }

    async fn find<T>(&self, file: &str, key: T::Key) -> Result<Option<T>>
    where
        T: Keyed + DeserializeOwned,
    {
        let items: Vec<T> = self.read(file).await?;
        Ok(items.into_iter().find(|item| item.key() == key))
    }

    async fn remove<T>(&self, file: &str, key: T::Key) -> Result<()>
    where
        T: Keyed + Serialize + DeserializeOwned,
    {
        let mut items: Vec<T> = self.read(file).await?;
        let before = items.len();
        items.retain(|item| item.key() != key);
        if items.len() != before {
            self.write(file, &items).await?;
            debug!(file, id = %key, "Deleted item");
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl Storage for JsonStorage {
    async fn save_time(&mut self, record: &PerformanceRecord) -> Result<()> {
        self.insert(TIMES_FILE, record).await
    }

    async fn update_time(&mut self, record: &PerformanceRecord) -> Result<()> {
        self.replace(TIMES_FILE, record, "swim time").await
    }

    async fn load_time(&self, id: RecordId) -> Result<Option<PerformanceRecord>> {
        self.find(TIMES_FILE, id).await
    }

    async fn list_times(&self) -> Result<Vec<PerformanceRecord>> {
        let mut records: Vec<PerformanceRecord> = self.read(TIMES_FILE).await?;
        records.retain(|r| {
            let valid = r.is_valid();
            if !valid {
                warn!(id = %r.id, time = r.time, "Ignoring swim time with invalid time");
            }
            valid
        });
        Ok(records)
    }

    async fn delete_time(&mut self, id: RecordId) -> Result<()> {
        self.remove::<PerformanceRecord>(TIMES_FILE, id).await
    }

    async fn save_workout(&mut self, workout: &Workout) -> Result<()> {
        self.insert(WORKOUTS_FILE, workout).await
    }

    async fn update_workout(&mut self, workout: &Workout) -> Result<()> {
        self.replace(WORKOUTS_FILE, workout, "workout").await
    }

    async fn load_workout(&self, id: WorkoutId) -> Result<Option<Workout>> {
        self.find(WORKOUTS_FILE, id).await
    }

    async fn list_workouts(&self) -> Result<Vec<Workout>> {
        self.read(WORKOUTS_FILE).await
    }

    async fn delete_workout(&mut self, id: WorkoutId) -> Result<()> {
        self.remove::<Workout>(WORKOUTS_FILE, id).await
    }

    async fn save_goal(&mut self, goal: &Goal) -> Result<()> {
        self.insert(GOALS_FILE, goal).await
    }

    async fn update_goal(&mut self, goal: &Goal) -> Result<()> {
        self.replace(GOALS_FILE, goal, "goal").await
    }

    async fn load_goal(&self, id: GoalId) -> Result<Option<Goal>> {
        self.find(GOALS_FILE, id).await
    }

    async fn list_goals(&self) -> Result<Vec<Goal>> {
        let mut goals: Vec<Goal> = self.read(GOALS_FILE).await?;
        goals.retain(|g| {
            let valid = g.is_valid();
            if !valid {
                warn!(id = %g.id, target = g.target_time, "Ignoring goal with invalid time");
            }
            valid
        });
        Ok(goals)
    }

    async fn delete_goal(&mut self, id: GoalId) -> Result<()> {
        self.remove::<Goal>(GOALS_FILE, id).await
    }
}

async fn read_collection<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    match fs::read_to_string(path).await {
        Ok(json) if json.trim().is_empty() => Ok(Vec::new()),
        Ok(json) => Ok(serde_json::from_str(&json)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}

async fn write_collection<T: Serialize>(path: &Path, items: &[T]) -> Result<()> {
    let json = serde_json::to_string_pretty(items)?;
    fs::write(path, json.as_bytes()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aquatrack_core::{Date, Distance, Stroke, WorkoutType};
    use crate::StorageError;

    fn day(d: u32) -> Date {
        Date::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[tokio::test]
    async fn test_empty_store_lists_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStorage::new(dir.path()).await.unwrap();

        assert!(storage.list_times().await.unwrap().is_empty());
        assert!(storage.list_workouts().await.unwrap().is_empty());
        assert!(storage.list_goals().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_time_crud() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = JsonStorage::new(dir.path()).await.unwrap();

        let mut record = PerformanceRecord::new(Stroke::Freestyle, Distance::M50, 30.1, day(1));
        storage.save_time(&record).await.unwrap();
        storage
            .save_time(&PerformanceRecord::new(Stroke::Butterfly, Distance::M100, 70.0, day(2)))
            .await
            .unwrap();
        assert_eq!(storage.list_times().await.unwrap().len(), 2);

        record.time = 29.9;
        storage.update_time(&record).await.unwrap();
        let loaded = storage.load_time(record.id).await.unwrap().unwrap();
        assert_eq!(loaded.time, 29.9);

        storage.delete_time(record.id).await.unwrap();
        assert!(storage.load_time(record.id).await.unwrap().is_none());
        assert_eq!(storage.list_times().await.unwrap().len(), 1);

        // Deleting again is a no-op
        storage.delete_time(record.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_update_missing_goal_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = JsonStorage::new(dir.path()).await.unwrap();

        let goal = Goal::new(Stroke::Backstroke, Distance::M200, 150.0);
        let err = storage.update_goal(&goal).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_data_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let workout = Workout::new(day(3), WorkoutType::Speed, 60, 2500);
        {
            let mut storage = JsonStorage::new(dir.path()).await.unwrap();
            storage.save_workout(&workout).await.unwrap();
        }

        let storage = JsonStorage::new(dir.path()).await.unwrap();
        let loaded = storage.load_workout(workout.id).await.unwrap().unwrap();
        assert_eq!(loaded, workout);
    }

    #[tokio::test]
    async fn test_hand_edited_invalid_time_is_not_listed() {
        let dir = tempfile::tempdir().unwrap();
        let json = r#"[
            {"id": "01HQ0000000000000000000001", "stroke": "backstroke", "distance": 100, "time": -3.0, "date": "2024-01-01"},
            {"id": "01HQ0000000000000000000002", "stroke": "backstroke", "distance": 100, "time": 71.2, "date": "2024-01-02"}
        ]"#;
        std::fs::write(dir.path().join(TIMES_FILE), json).unwrap();
        let storage = JsonStorage::new(dir.path()).await.unwrap();

        let times = storage.list_times().await.unwrap();
        assert_eq!(times.len(), 1);
        assert_eq!(times[0].time, 71.2);
    }

    #[tokio::test]
    async fn test_corrupt_file_reports_json_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(GOALS_FILE), "{ not json").unwrap();
        let storage = JsonStorage::new(dir.path()).await.unwrap();

        let err = storage.list_goals().await.unwrap_err();
        assert!(matches!(err, StorageError::Json(_)));
    }
}
