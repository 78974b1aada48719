//! Progress Tracking
//!
//! Goal-achievement prediction, personal bests, motivational messages and
//! shareable summaries.

#![warn(missing_docs)]

pub mod regression;
pub mod predictor;
pub mod motivation;
pub mod stats;
pub mod tracker;
pub mod share;

pub use regression::LinearFit;
pub use predictor::{PredictionConfig, PredictionEngine};
pub use motivation::{motivational_message, motivational_message_with};
pub use stats::{
    PersonalBest, TrainingSummary, best_improvement, personal_best, personal_bests,
    summarize, total_distance_km, workout_streak,
};
pub use tracker::{GoalReport, GoalTracker};
pub use share::{ShareKind, SharePlatform, ShareableResult, goal_name, share_achievement,
    share_goal_achieved, share_progress, share_text, share_time, share_url, share_workout};
