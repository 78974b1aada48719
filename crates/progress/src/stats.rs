//! Personal bests and training summaries.

use aquatrack_core::{Date, Distance, PerformanceRecord, Stroke, Workout};
use serde::Serialize;

/// Fastest logged time for one event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonalBest {
    /// Stroke
    pub stroke: Stroke,
    /// Distance
    pub distance: Distance,
    /// The record holding the best time
    pub record: PerformanceRecord,
}

/// Headline numbers across everything logged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingSummary {
    /// Number of logged swim times
    pub total_times: usize,
    /// Number of logged workouts
    pub total_workouts: usize,
    /// Number of events with a personal best
    pub personal_best_count: usize,
    /// Largest single drop between consecutive swims of one event
    pub best_improvement: Option<(Stroke, Distance, f64)>,
    /// Consecutive training days ending today or yesterday
    pub current_streak: u32,
    /// Total workout distance in kilometers
    pub total_distance_km: f64,
}

/// Fastest record for the event, if any.
pub fn personal_best(records: &[PerformanceRecord], stroke: Stroke, distance: Distance) -> Option<&PerformanceRecord> {
    records
        .iter()
        .filter(|r| r.is_event(stroke, distance))
        .min_by(|a, b| a.time.total_cmp(&b.time))
}

/// Personal bests over the stroke × distance grid, skipping empty events.
pub fn personal_bests(records: &[PerformanceRecord]) -> Vec<PersonalBest> {
    Stroke::ALL
        .iter()
        .flat_map(|&stroke| Distance::ALL.iter().map(move |&distance| (stroke, distance)))
        .filter_map(|(stroke, distance)| {
            personal_best(records, stroke, distance).map(|record| PersonalBest {
                stroke,
                distance,
                record: record.clone(),
            })
        })
        .collect()
}

/// Largest drop in time between chronologically consecutive swims of the event.
///
/// `None` when there are fewer than two swims or times never dropped.
pub fn best_improvement(records: &[PerformanceRecord], stroke: Stroke, distance: Distance) -> Option<f64> {
    let mut times: Vec<&PerformanceRecord> = records.iter().filter(|r| r.is_event(stroke, distance)).collect();
    times.sort_by_key(|r| r.date);

    times
        .windows(2)
        .map(|pair| pair[0].time - pair[1].time)
        .filter(|drop| *drop > 0.0)
        .reduce(f64::max)
}

/// Number of consecutive training days counting back from `today`.
///
/// Walks distinct workout days newest first; a day extends the streak while
/// it is at most `streak + 1` days before today, so a streak survives until
/// the end of the day after the last session.
pub fn workout_streak(workouts: &[Workout], today: Date) -> u32 {
    let mut days: Vec<Date> = workouts.iter().map(|w| w.date).collect();
    days.sort_unstable_by(|a, b| b.cmp(a));
    days.dedup();

    let mut streak = 0u32;
    for date in days {
        let days_ago = (today - date).num_days();
        if days_ago <= streak as i64 + 1 {
            streak += 1;
        } else {
            break;
        }
    }
    streak
}

/// Total workout distance in kilometers.
pub fn total_distance_km(workouts: &[Workout]) -> f64 {
    workouts.iter().map(|w| w.distance_meters as f64).sum::<f64>() / 1000.0
}

/// Summarize everything logged as of `today`.
pub fn summarize(records: &[PerformanceRecord], workouts: &[Workout], today: Date) -> TrainingSummary {
    let best_improvement = Stroke::ALL
        .iter()
        .flat_map(|&stroke| Distance::ALL.iter().map(move |&distance| (stroke, distance)))
        .filter_map(|(stroke, distance)| {
            best_improvement(records, stroke, distance).map(|drop| (stroke, distance, drop))
        })
        .max_by(|a, b| a.2.total_cmp(&b.2));

    TrainingSummary {
        total_times: records.len(),
        total_workouts: workouts.len(),
        personal_best_count: personal_bests(records).len(),
        best_improvement,
        current_streak: workout_streak(workouts, today),
        total_distance_km: total_distance_km(workouts),
    }
}
