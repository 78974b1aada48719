//! Prediction output for a goal.

use serde::{Deserialize, Serialize};
use crate::id::GoalId;
use crate::Date;

/// Direction of recent performance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    /// Times are getting faster
    Improving,
    /// No meaningful change
    Stable,
    /// Times are getting slower
    Declining,
}

impl Trend {
    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Improving => "improving",
            Trend::Stable => "stable",
            Trend::Declining => "declining",
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of predicting when a goal will be reached. Not persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Goal this prediction is for
    pub goal_id: GoalId,

    /// Estimated day the target time is reached
    pub predicted_date: Option<Date>,

    /// Fit quality of the trend, 0-100
    pub confidence: f64,

    /// Days from today until the predicted date
    pub days_to_goal: Option<u64>,

    /// Seconds still to drop; zero or negative once the goal is met
    pub required_improvement: f64,

    /// Recent direction
    pub current_trend: Trend,

    /// Seconds gained per day (positive = getting faster)
    pub improvement_rate: f64,
}

impl PredictionResult {
    /// Whether the current best already meets the target.
    ///
    /// Only meaningful when a best time is known. A result computed with no
    /// matching records and no recorded best also carries a zero
    /// `required_improvement`, so this returns `true` for it as well; use
    /// the swimmer's logged best to tell the two apart.
    pub fn goal_met(&self) -> bool {
        self.required_improvement <= 0.0
    }
}
