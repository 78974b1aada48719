//! Goal model - a target time for one event.

use serde::{Deserialize, Serialize};
use crate::format::is_valid_time;
use crate::id::GoalId;
use crate::swim::{Distance, Stroke};
use crate::{Date, Time};

/// A goal is a target time the swimmer wants to reach for one stroke and distance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    /// Unique identifier
    pub id: GoalId,

    /// Stroke the goal applies to
    pub stroke: Stroke,

    /// Distance the goal applies to
    pub distance: Distance,

    /// Target time in seconds
    pub target_time: f64,

    /// Best time known when the goal was set, in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_best: Option<f64>,

    /// Optional deadline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<Date>,

    /// Whether the goal is still being pursued
    pub is_active: bool,

    /// When created
    pub created_at: Time,

    /// When the goal was marked achieved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub achieved_at: Option<Time>,

    /// Free-form notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Goal {
    /// Create a new active goal.
    pub fn new(stroke: Stroke, distance: Distance, target_time: f64) -> Self {
        Self {
            id: GoalId::new(),
            stroke,
            distance,
            target_time,
            current_best: None,
            deadline: None,
            is_active: true,
            created_at: chrono::Utc::now(),
            achieved_at: None,
            notes: None,
        }
    }

    /// Set the best time known when creating the goal.
    pub fn with_current_best(mut self, seconds: f64) -> Self {
        self.current_best = Some(seconds);
        self
    }

    /// Set a deadline.
    pub fn with_deadline(mut self, deadline: Date) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Mark the goal achieved at `now`. The goal stops being active.
    pub fn mark_achieved(&mut self, now: Time) {
        self.achieved_at = Some(now);
        self.is_active = false;
    }

    /// Whether the target time, and the recorded best if any, are finite and positive.
    pub fn is_valid(&self) -> bool {
        is_valid_time(self.target_time) && self.current_best.map_or(true, is_valid_time)
    }

    /// Days left until the deadline, negative once it has passed.
    pub fn days_until_deadline(&self, today: Date) -> Option<i64> {
        self.deadline.map(|d| (d - today).num_days())
    }
}
