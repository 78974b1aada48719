//! AquaTrack core data models.
//!
//! This crate defines the records a swimmer logs (times, workouts, goals)
//! and the shape of the prediction output computed over them.

#![warn(missing_docs)]

// Core identities
mod id;

// Swimming events and logged data
mod swim;
mod workout;
mod goal;

// Analytics output
mod prediction;

// Display helpers
mod format;
mod error;

// Re-exports
pub use id::*;

pub use swim::{Stroke, Distance, PerformanceRecord};
pub use workout::{Workout, WorkoutType};
pub use goal::Goal;
pub use prediction::{PredictionResult, Trend};
pub use format::{format_time, format_date, format_date_short, is_valid_time, parse_time};
pub use error::ParseError;

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;

/// Calendar date type used for logged swims and workouts
pub type Date = chrono::NaiveDate;
