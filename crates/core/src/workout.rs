//! Workout model - a logged training session.

use serde::{Deserialize, Serialize};
use crate::error::ParseError;
use crate::id::WorkoutId;
use crate::Date;

/// Kind of training session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutType {
    /// Drills and form work
    Technique,
    /// Long aerobic sets
    Endurance,
    /// Sprints and race pace
    Speed,
    /// Easy swimming
    Recovery,
    /// A bit of everything
    Mixed,
}

impl WorkoutType {
    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutType::Technique => "technique",
            WorkoutType::Endurance => "endurance",
            WorkoutType::Speed => "speed",
            WorkoutType::Recovery => "recovery",
            WorkoutType::Mixed => "mixed",
        }
    }
}

impl std::fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for WorkoutType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "technique" => Ok(WorkoutType::Technique),
            "endurance" => Ok(WorkoutType::Endurance),
            "speed" => Ok(WorkoutType::Speed),
            "recovery" => Ok(WorkoutType::Recovery),
            "mixed" => Ok(WorkoutType::Mixed),
            other => Err(ParseError::WorkoutType(other.to_string())),
        }
    }
}

/// A training session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    /// Unique identifier
    pub id: WorkoutId,

    /// Day of the session
    pub date: Date,

    /// Session type
    pub workout_type: WorkoutType,

    /// Duration in minutes
    pub duration_minutes: u32,

    /// Total distance swum in meters
    pub distance_meters: u32,

    /// Number of sets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,

    /// Rest interval, free-form (e.g. "15s")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest_interval: Option<String>,

    /// Free-form notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Workout {
    /// Create a new workout with a fresh id.
    pub fn new(date: Date, workout_type: WorkoutType, duration_minutes: u32, distance_meters: u32) -> Self {
        Self {
            id: WorkoutId::new(),
            date,
            workout_type,
            duration_minutes,
            distance_meters,
            sets: None,
            rest_interval: None,
            notes: None,
        }
    }
}
