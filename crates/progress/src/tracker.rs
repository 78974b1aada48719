//! Goal tracking service.

use std::sync::Arc;
use aquatrack_core::{Date, Goal, GoalId, PerformanceRecord, PredictionResult, Time};
use aquatrack_storage::{Storage, StorageError, Result};
use tokio::sync::Mutex;
use tracing::{info, warn};
use crate::predictor::PredictionEngine;
use crate::stats::personal_best;

/// A goal together with where the swimmer stands on it.
#[derive(Debug, Clone)]
pub struct GoalReport {
    /// The goal
    pub goal: Goal,

    /// Trend-based prediction
    pub prediction: PredictionResult,

    /// Fastest logged time for the goal's event
    pub current_best: Option<f64>,

    /// Remaining gap as a percentage of the current best, 0-100
    pub gap_percent: f64,
}

impl GoalReport {
    /// Whether the logged best already meets the target and the goal can be marked achieved.
    pub fn can_mark_achieved(&self) -> bool {
        self.goal.is_active && self.current_best.is_some_and(|best| best <= self.goal.target_time)
    }
}

/// Tracks goals against logged swims using an injected storage backend.
pub struct GoalTracker<S: Storage> {
    storage: Arc<Mutex<S>>,
    engine: PredictionEngine,
}

impl<S: Storage> GoalTracker<S> {
    /// Create a tracker with the default prediction engine.
    pub fn new(storage: S) -> Self {
        Self {
            storage: Arc::new(Mutex::new(storage)),
            engine: PredictionEngine::new(),
        }
    }

    /// Use a custom prediction engine.
    pub fn with_engine(mut self, engine: PredictionEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Shared handle to the underlying storage.
    pub fn storage(&self) -> Arc<Mutex<S>> {
        Arc::clone(&self.storage)
    }

    /// Predict a single goal. `None` if the goal does not exist.
    pub async fn predict_goal(&self, goal_id: GoalId, today: Date) -> Result<Option<PredictionResult>> {
        let storage = self.storage.lock().await;
        let Some(goal) = storage.load_goal(goal_id).await? else {
            return Ok(None);
        };
        let times = storage.list_times().await?;
        Ok(Some(self.engine.predict(&goal, &times, today)))
    }

    /// Build a report for every active goal.
    pub async fn active_reports(&self, today: Date) -> Result<Vec<GoalReport>> {
        let storage = self.storage.lock().await;
        let goals = storage.list_goals().await?;
        let times = storage.list_times().await?;

        let reports: Vec<GoalReport> = goals
            .into_iter()
            .filter(|g| g.is_active)
            .map(|goal| self.report(goal, &times, today))
            .collect();

        info!(goals = reports.len(), "Built goal reports");
        Ok(reports)
    }

    fn report(&self, goal: Goal, times: &[PerformanceRecord], today: Date) -> GoalReport {
        let prediction = self.engine.predict(&goal, times, today);
        let current_best = personal_best(times, goal.stroke, goal.distance).map(|r| r.time);
        let gap_percent = current_best
            .map(|best| ((best - goal.target_time) / best * 100.0).clamp(0.0, 100.0))
            .unwrap_or(0.0);

        GoalReport {
            goal,
            prediction,
            current_best,
            gap_percent,
        }
    }

    /// Mark a goal achieved at `now` and persist it.
    pub async fn mark_achieved(&self, goal_id: GoalId, now: Time) -> Result<Goal> {
        let mut storage = self.storage.lock().await;
        let mut goal = storage
            .load_goal(goal_id)
            .await?
            .ok_or_else(|| StorageError::NotFound(format!("goal {}", goal_id)))?;

        if !goal.is_active {
            warn!(goal = %goal_id, "Goal was already inactive");
        }

        goal.mark_achieved(now);
        storage.update_goal(&goal).await?;
        info!(goal = %goal_id, "Marked goal achieved");
        Ok(goal)
    }
}
