//! In-memory storage backend.

use aquatrack_core::{Goal, GoalId, PerformanceRecord, RecordId, Workout, WorkoutId};
use super::trait_::{replace_keyed, Keyed};
use super::{Result, Storage};

/// Storage that keeps everything in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    times: Vec<PerformanceRecord>,
    workouts: Vec<Workout>,
    goals: Vec<Goal>,
}

impl MemoryStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with swim times and goals.
    pub fn with_data(times: Vec<PerformanceRecord>, goals: Vec<Goal>) -> Self {
        Self {
            times,
            workouts: Vec::new(),
            goals,
        }
    }
}

fn find<T: Keyed + Clone>(items: &[T], key: T::Key) -> Option<T> {
    items.iter().find(|item| item.key() == key).cloned()
}

fn remove<T: Keyed>(items: &mut Vec<T>, key: T::Key) {
    items.retain(|item| item.key() != key);
}

#[async_trait::async_trait]
impl Storage for MemoryStorage {
    async fn save_time(&mut self, record: &PerformanceRecord) -> Result<()> {
        self.times.push(record.clone());
        Ok(())
    }

    async fn update_time(&mut self, record: &PerformanceRecord) -> Result<()> {
        replace_keyed(&mut self.times, record, "swim time")
    }

    async fn load_time(&self, id: RecordId) -> Result<Option<PerformanceRecord>> {
        Ok(find(&self.times, id))
    }

    async fn list_times(&self) -> Result<Vec<PerformanceRecord>> {
        Ok(self.times.clone())
    }

    async fn delete_time(&mut self, id: RecordId) -> Result<()> {
        remove(&mut self.times, id);
        Ok(())
    }

    async fn save_workout(&mut self, workout: &Workout) -> Result<()> {
        self.workouts.push(workout.clone());
        Ok(())
    }

    async fn update_workout(&mut self, workout: &Workout) -> Result<()> {
        replace_keyed(&mut self.workouts, workout, "workout")
    }

    async fn load_workout(&self, id: WorkoutId) -> Result<Option<Workout>> {
        Ok(find(&self.workouts, id))
    }

    async fn list_workouts(&self) -> Result<Vec<Workout>> {
        Ok(self.workouts.clone())
    }

    async fn delete_workout(&mut self, id: WorkoutId) -> Result<()> {
        remove(&mut self.workouts, id);
        Ok(())
    }

    async fn save_goal(&mut self, goal: &Goal) -> Result<()> {
        self.goals.push(goal.clone());
        Ok(())
    }

    async fn update_goal(&mut self, goal: &Goal) -> Result<()> {
        replace_keyed(&mut self.goals, goal, "goal")
    }

    async fn load_goal(&self, id: GoalId) -> Result<Option<Goal>> {
        Ok(find(&self.goals, id))
    }

    async fn list_goals(&self) -> Result<Vec<Goal>> {
        Ok(self.goals.clone())
    }

    async fn delete_goal(&mut self, id: GoalId) -> Result<()> {
        remove(&mut self.goals, id);
        Ok(())
    }
}
