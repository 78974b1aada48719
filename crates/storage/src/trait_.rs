//! Storage trait abstraction.

use async_trait::async_trait;
use aquatrack_core::{Goal, GoalId, PerformanceRecord, RecordId, Workout, WorkoutId};

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Item not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Storage abstraction for AquaTrack data.
///
/// Backends are constructed explicitly and handed to the services that need
/// them; there is no process-wide instance.
#[async_trait]
pub trait Storage: Send + Sync {
    // === Swim time operations ===

    /// Save a new swim time.
    async fn save_time(&mut self, record: &PerformanceRecord) -> Result<()>;

    /// Replace an existing swim time. Fails with `NotFound` if absent.
    async fn update_time(&mut self, record: &PerformanceRecord) -> Result<()>;

    /// Load a swim time by ID.
    async fn load_time(&self, id: RecordId) -> Result<Option<PerformanceRecord>>;

    /// List all swim times, regardless of stroke or distance.
    async fn list_times(&self) -> Result<Vec<PerformanceRecord>>;

    /// Delete a swim time. Deleting a missing ID is not an error.
    async fn delete_time(&mut self, id: RecordId) -> Result<()>;

    // === Workout operations ===

    /// Save a new workout.
    async fn save_workout(&mut self, workout: &Workout) -> Result<()>;

    /// Replace an existing workout. Fails with `NotFound` if absent.
    async fn update_workout(&mut self, workout: &Workout) -> Result<()>;

    /// Load a workout by ID.
    async fn load_workout(&self, id: WorkoutId) -> Result<Option<Workout>>;

    /// List all workouts.
    async fn list_workouts(&self) -> Result<Vec<Workout>>;

    /// Delete a workout.
    async fn delete_workout(&mut self, id: WorkoutId) -> Result<()>;

    // === Goal operations ===

    /// Save a new goal.
    async fn save_goal(&mut self, goal: &Goal) -> Result<()>;

    /// Replace an existing goal. Fails with `NotFound` if absent.
    async fn update_goal(&mut self, goal: &Goal) -> Result<()>;

    /// Load a goal by ID.
    async fn load_goal(&self, id: GoalId) -> Result<Option<Goal>>;

    /// List all goals.
    async fn list_goals(&self) -> Result<Vec<Goal>>;

    /// Delete a goal.
    async fn delete_goal(&mut self, id: GoalId) -> Result<()>;
}

/// Entities addressable by a unique key.
pub(crate) trait Keyed {
    type Key: PartialEq + std::fmt::Display + Copy;

    fn key(&self) -> Self::Key;
}

impl Keyed for PerformanceRecord {
    type Key = RecordId;

    fn key(&self) -> RecordId {
        self.id
    }
}

impl Keyed for Workout {
    type Key = WorkoutId;

    fn key(&self) -> WorkoutId {
        self.id
    }
}

impl Keyed for Goal {
    type Key = GoalId;

    fn key(&self) -> GoalId {
        self.id
    }
}

/// Replace the item with the same key in place.
pub(crate) fn replace_keyed<T: Keyed + Clone>(items: &mut [T], item: &T, kind: &str) -> Result<()> {
    let slot = items
        .iter_mut()
        .find(|existing| existing.key() == item.key())
        .ok_or_else(|| StorageError::NotFound(format!("{} {}", kind, item.key())))?;
    *slot = item.clone();
    Ok(())
}
