//! Export and import of the full data set.

use aquatrack_core::{format_date, format_time, Goal, PerformanceRecord, Time, Workout};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{info, warn};
use super::{Result, Storage};

/// Everything a user has logged, as written to a JSON backup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportBundle {
    /// When the export was taken
    pub export_date: Time,

    /// Logged swim times
    #[serde(default)]
    pub swimming_times: Vec<PerformanceRecord>,

    /// Logged workouts
    #[serde(default)]
    pub workouts: Vec<Workout>,

    /// Goals
    #[serde(default)]
    pub goals: Vec<Goal>,
}

impl ExportBundle {
    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a JSON backup.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Counts of items added by an import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Swim times added
    pub times: usize,
    /// Workouts added
    pub workouts: usize,
    /// Goals added
    pub goals: usize,
    /// Items skipped because their ID already existed
    pub skipped: usize,
    /// Items dropped because a time was zero, negative or not finite
    pub invalid: usize,
}

/// Snapshot everything in `storage`.
pub async fn export_bundle<S: Storage + ?Sized>(storage: &S, now: Time) -> Result<ExportBundle> {
    Ok(ExportBundle {
        export_date: now,
        swimming_times: storage.list_times().await?,
        workouts: storage.list_workouts().await?,
        goals: storage.list_goals().await?,
    })
}

/// Merge a backup into `storage`.
///
/// Items whose ID is already present, or repeated within the backup, are
/// skipped. Swim times and goals with unusable times are dropped.
pub async fn import_bundle<S: Storage + ?Sized>(storage: &mut S, bundle: &ExportBundle) -> Result<ImportSummary> {
    let mut summary = ImportSummary::default();

    let mut existing: HashSet<_> = storage.list_times().await?.into_iter().map(|t| t.id).collect();
    for record in &bundle.swimming_times {
        if !record.is_valid() {
            warn!(id = %record.id, time = record.time, "Dropping swim time with invalid time");
            summary.invalid += 1;
        } else if !existing.insert(record.id) {
            summary.skipped += 1;
        } else {
            storage.save_time(record).await?;
            summary.times += 1;
        }
    }

    let mut existing: HashSet<_> = storage.list_workouts().await?.into_iter().map(|w| w.id).collect();
    for workout in &bundle.workouts {
        if !existing.insert(workout.id) {
            summary.skipped += 1;
        } else {
            storage.save_workout(workout).await?;
            summary.workouts += 1;
        }
    }

    let mut existing: HashSet<_> = storage.list_goals().await?.into_iter().map(|g| g.id).collect();
    for goal in &bundle.goals {
        if !goal.is_valid() {
            warn!(id = %goal.id, target = goal.target_time, "Dropping goal with invalid time");
            summary.invalid += 1;
        } else if !existing.insert(goal.id) {
            summary.skipped += 1;
        } else {
            storage.save_goal(goal).await?;
            summary.goals += 1;
        }
    }

    info!(
        times = summary.times,
        workouts = summary.workouts,
        goals = summary.goals,
        skipped = summary.skipped,
        invalid = summary.invalid,
        "Imported backup"
    );
    Ok(summary)
}

/// Render swim times as CSV with every cell quoted.
pub fn times_csv(records: &[PerformanceRecord]) -> String {
    let header = ["Date", "Stroke", "Distance", "Time", "Notes"].map(String::from);
    let rows = records.iter().map(|r| {
        [
            format_date(r.date),
            r.stroke.to_string(),
            r.distance.meters().to_string(),
            format_time(r.time),
            r.notes.clone().unwrap_or_default(),
        ]
    });
    render_csv(std::iter::once(header).chain(rows))
}

/// Render workouts as CSV with every cell quoted.
pub fn workouts_csv(workouts: &[Workout]) -> String {
    let header = [
        "Date",
        "Type",
        "Duration (min)",
        "Distance (m)",
        "Sets",
        "Rest Interval",
        "Notes",
    ]
    .map(String::from);
    let rows = workouts.iter().map(|w| {
        [
            format_date(w.date),
            w.workout_type.to_string(),
            w.duration_minutes.to_string(),
            w.distance_meters.to_string(),
            w.sets.map(|s| s.to_string()).unwrap_or_default(),
            w.rest_interval.clone().unwrap_or_default(),
            w.notes.clone().unwrap_or_default(),
        ]
    });
    render_csv(std::iter::once(header).chain(rows))
}

fn render_csv<const N: usize>(rows: impl Iterator<Item = [String; N]>) -> String {
    rows.map(|row| {
        row.iter()
            .map(|cell| format!("\"{}\"", cell.replace('"', "\"\"")))
            .collect::<Vec<_>>()
            .join(",")
    })
    .collect::<Vec<_>>()
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStorage;
    use aquatrack_core::{Date, Distance, Stroke, WorkoutType};

    fn day(d: u32) -> Date {
        Date::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn test_times_csv() {
        let records = vec![
            PerformanceRecord::new(Stroke::Freestyle, Distance::M50, 28.5, day(1))
                .with_notes("felt \"fast\""),
        ];
        let csv = times_csv(&records);
        let lines: Vec<_> = csv.lines().collect();

        assert_eq!(lines[0], "\"Date\",\"Stroke\",\"Distance\",\"Time\",\"Notes\"");
        assert_eq!(
            lines[1],
            "\"Mar 01, 2024\",\"freestyle\",\"50\",\"00:28.50\",\"felt \"\"fast\"\"\""
        );
    }

    #[test]
    fn test_workouts_csv_empty_optionals() {
        let csv = workouts_csv(&[Workout::new(day(2), WorkoutType::Endurance, 45, 2000)]);
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(row, "\"Mar 02, 2024\",\"endurance\",\"45\",\"2000\",\"\",\"\",\"\"");
    }

    #[tokio::test]
    async fn test_export_then_import_into_fresh_store() {
        let mut source = MemoryStorage::new();
        source
            .save_time(&PerformanceRecord::new(Stroke::Backstroke, Distance::M100, 72.3, day(4)))
            .await
            .unwrap();
        source
            .save_goal(&Goal::new(Stroke::Backstroke, Distance::M100, 70.0))
            .await
            .unwrap();

        let bundle = export_bundle(&source, chrono::Utc::now()).await.unwrap();
        let json = bundle.to_json().unwrap();
        let parsed = ExportBundle::from_json(&json).unwrap();

        let mut target = MemoryStorage::new();
        let summary = import_bundle(&mut target, &parsed).await.unwrap();
        assert_eq!(summary.times, 1);
        assert_eq!(summary.goals, 1);
        assert_eq!(summary.skipped, 0);

        // Importing the same backup again adds nothing
        let again = import_bundle(&mut target, &parsed).await.unwrap();
        assert_eq!(again.times, 0);
        assert_eq!(again.skipped, 2);
        assert_eq!(target.list_times().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_import_repeated_id_saved_once() {
        let record = PerformanceRecord::new(Stroke::Freestyle, Distance::M50, 29.1, day(5));
        let bundle = ExportBundle {
            export_date: chrono::Utc::now(),
            swimming_times: vec![record.clone(), record.clone()],
            workouts: Vec::new(),
            goals: Vec::new(),
        };

        let mut storage = MemoryStorage::new();
        let summary = import_bundle(&mut storage, &bundle).await.unwrap();

        assert_eq!(summary.times, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(storage.list_times().await.unwrap(), vec![record]);
    }

    #[tokio::test]
    async fn test_import_drops_invalid_times() {
        let json = r#"{
            "export_date": "2024-03-01T00:00:00Z",
            "swimming_times": [
                {"id": "01HQ0000000000000000000001", "stroke": "freestyle", "distance": 50, "time": -5.0, "date": "2024-03-01"},
                {"id": "01HQ0000000000000000000002", "stroke": "freestyle", "distance": 50, "time": 0.0, "date": "2024-03-02"},
                {"id": "01HQ0000000000000000000003", "stroke": "freestyle", "distance": 50, "time": 29.4, "date": "2024-03-03"}
            ],
            "workouts": [],
            "goals": [
                {"id": "01HQ0000000000000000000004", "stroke": "freestyle", "distance": 50, "target_time": -1.0,
                 "is_active": true, "created_at": "2024-03-01T00:00:00Z"}
            ]
        }"#;
        let bundle = ExportBundle::from_json(json).unwrap();

        let mut storage = MemoryStorage::new();
        let summary = import_bundle(&mut storage, &bundle).await.unwrap();

        assert_eq!(summary.times, 1);
        assert_eq!(summary.goals, 0);
        assert_eq!(summary.invalid, 3);
        let stored = storage.list_times().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].time, 29.4);
        assert!(storage.list_goals().await.unwrap().is_empty());
    }

    #[test]
    fn test_bundle_without_goals_parses() {
        let json = r#"{"export_date":"2024-03-01T00:00:00Z","swimming_times":[],"workouts":[]}"#;
        let bundle = ExportBundle::from_json(json).unwrap();
        assert!(bundle.goals.is_empty());
    }
}
