//! Goal-achievement prediction.
//!
//! Fits a straight line through the swimmer's most recent times for the
//! goal's event and extrapolates it to the target time. The fit quality
//! becomes the confidence score.

use aquatrack_core::{Date, Goal, PerformanceRecord, PredictionResult, Trend};
use chrono::Days;
use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::regression::LinearFit;

/// Tunables for the prediction engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionConfig {
    /// Number of most recent matching records fed to the regression
    pub window: usize,

    /// Fewest matching records needed before predicting anything
    pub min_records: usize,

    /// Improvement rate (seconds/day) beyond which the trend is not stable
    pub trend_threshold: f64,

    /// Spacing assumed between records when their dates span no time
    pub default_spacing_days: f64,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            window: 10,
            min_records: 3,
            trend_threshold: 0.01,
            default_spacing_days: 30.0,
        }
    }
}

/// Predicts when a goal time will be reached.
///
/// Stateless apart from its configuration: the same goal, records and `today`
/// always produce the same result.
#[derive(Debug, Clone, Default)]
pub struct PredictionEngine {
    config: PredictionConfig,
}

impl PredictionEngine {
    /// Create an engine with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with custom settings.
    pub fn with_config(config: PredictionConfig) -> Self {
        Self { config }
    }

    /// Current configuration.
    pub fn config(&self) -> &PredictionConfig {
        &self.config
    }

    /// Predict using the current UTC date as today.
    pub fn predict_now(&self, goal: &Goal, records: &[PerformanceRecord]) -> PredictionResult {
        self.predict(goal, records, chrono::Utc::now().date_naive())
    }

    /// Predict when `goal` will be reached given all logged `records`.
    ///
    /// `records` may cover any stroke and distance; only the goal's event is
    /// considered.
    pub fn predict(&self, goal: &Goal, records: &[PerformanceRecord], today: Date) -> PredictionResult {
        let recent = self.recent_for_goal(goal, records);

        // Two points are the least a line can be fitted through
        let min_records = self.config.min_records.max(2);
        if recent.len() < min_records {
            debug!(goal = %goal.id, records = recent.len(), "Not enough data to predict");
            return self.insufficient(goal, &recent);
        }

        let times: Vec<f64> = recent.iter().map(|r| r.time).collect();
        let Some(fit) = LinearFit::fit(&times) else {
            return self.insufficient(goal, &recent);
        };

        let spacing = self.average_spacing_days(&recent);
        let improvement_rate = normalize_zero(-fit.slope / spacing);
        let current_trend = self.classify(improvement_rate);

        let current_best = times.iter().copied().fold(f64::INFINITY, f64::min);
        let required_improvement = current_best - goal.target_time;

        let mut result = PredictionResult {
            goal_id: goal.id,
            predicted_date: None,
            confidence: 0.0,
            days_to_goal: None,
            required_improvement,
            current_trend,
            improvement_rate,
        };

        if improvement_rate > 0.0 && required_improvement > 0.0 {
            let days = (required_improvement / improvement_rate).ceil() as u64;
            result.days_to_goal = Some(days);
            result.predicted_date = today.checked_add_days(Days::new(days));
            result.confidence = fit.confidence_percent(&times);
        }

        debug!(
            goal = %goal.id,
            records = recent.len(),
            slope = fit.slope,
            rate = improvement_rate,
            trend = %current_trend,
            days = ?result.days_to_goal,
            "Predicted goal achievement"
        );

        result
    }

    /// Matching records, oldest first, limited to the configured window.
    fn recent_for_goal<'a>(&self, goal: &Goal, records: &'a [PerformanceRecord]) -> Vec<&'a PerformanceRecord> {
        let mut matching: Vec<&PerformanceRecord> = records
            .iter()
            .filter(|r| r.is_event(goal.stroke, goal.distance))
            .collect();
        matching.sort_by_key(|r| r.date);

        let excess = matching.len().saturating_sub(self.config.window);
        matching.drain(..excess);
        matching
    }

    fn average_spacing_days(&self, recent: &[&PerformanceRecord]) -> f64 {
        let (Some(first), Some(last)) = (recent.first(), recent.last()) else {
            return self.config.default_spacing_days;
        };
        let span_days = (last.date - first.date).num_days() as f64;
        let gaps = recent.len().saturating_sub(1) as f64;

        if gaps > 0.0 && span_days > 0.0 {
            span_days / gaps
        } else {
            self.config.default_spacing_days
        }
    }

    fn classify(&self, improvement_rate: f64) -> Trend {
        if improvement_rate > self.config.trend_threshold {
            Trend::Improving
        } else if improvement_rate < -self.config.trend_threshold {
            Trend::Declining
        } else {
            Trend::Stable
        }
    }

    fn insufficient(&self, goal: &Goal, recent: &[&PerformanceRecord]) -> PredictionResult {
        let best_known = goal.current_best.or_else(|| {
            recent.iter().map(|r| r.time).reduce(f64::min)
        });

        PredictionResult {
            goal_id: goal.id,
            predicted_date: None,
            confidence: 0.0,
            days_to_goal: None,
            required_improvement: best_known.map_or(0.0, |best| best - goal.target_time),
            current_trend: Trend::Stable,
            improvement_rate: 0.0,
        }
    }
}

fn normalize_zero(value: f64) -> f64 {
    if value == 0.0 { 0.0 } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aquatrack_core::{Distance, Stroke};

    fn day(offset: u64) -> Date {
        Date::from_ymd_opt(2024, 1, 1).unwrap() + Days::new(offset)
    }

    fn free50(offset: u64, time: f64) -> PerformanceRecord {
        PerformanceRecord::new(Stroke::Freestyle, Distance::M50, time, day(offset))
    }

    fn goal(target: f64) -> Goal {
        Goal::new(Stroke::Freestyle, Distance::M50, target)
    }

    #[test]
    fn test_reference_scenario() {
        let records = vec![
            free50(0, 30.0),
            free50(10, 29.5),
            free50(20, 29.0),
            free50(30, 28.5),
        ];
        let today = day(30);
        let result = PredictionEngine::new().predict(&goal(28.0), &records, today);

        assert!((result.improvement_rate - 0.05).abs() < 1e-9);
        assert!((result.required_improvement - 0.5).abs() < 1e-9);
        assert_eq!(result.days_to_goal, Some(10));
        assert_eq!(result.predicted_date, Some(day(40)));
        assert_eq!(result.current_trend, Trend::Improving);
        assert!(result.confidence > 99.0);
    }

    #[test]
    fn test_insufficient_data_is_degenerate() {
        let records = vec![free50(0, 30.0), free50(5, 29.0)];
        let result = PredictionEngine::new().predict(&goal(28.0), &records, day(10));

        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.predicted_date, None);
        assert_eq!(result.days_to_goal, None);
        assert_eq!(result.current_trend, Trend::Stable);
        assert_eq!(result.improvement_rate, 0.0);
        // Best matching record is the best known time
        assert!((result.required_improvement - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_insufficient_prefers_goal_current_best() {
        let g = goal(28.0).with_current_best(28.75);
        let result = PredictionEngine::new().predict(&g, &[free50(0, 30.0)], day(1));
        assert!((result.required_improvement - 0.75).abs() < 1e-9);

        let result = PredictionEngine::new().predict(&goal(28.0), &[], day(1));
        assert_eq!(result.required_improvement, 0.0);
    }

    #[test]
    fn test_other_events_are_ignored() {
        let mut records = vec![free50(0, 30.0), free50(7, 29.8)];
        records.push(PerformanceRecord::new(Stroke::Butterfly, Distance::M50, 25.0, day(3)));
        records.push(PerformanceRecord::new(Stroke::Freestyle, Distance::M100, 62.0, day(4)));

        let result = PredictionEngine::new().predict(&goal(28.0), &records, day(10));
        assert_eq!(result.current_trend, Trend::Stable);
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn test_decreasing_times_are_improving() {
        let records: Vec<_> = (0..6).map(|i| free50(i * 7, 31.0 - i as f64 * 0.3)).collect();
        let result = PredictionEngine::new().predict(&goal(27.0), &records, day(35));

        assert!(result.improvement_rate > 0.0);
        assert_eq!(result.current_trend, Trend::Improving);
        assert!(result.predicted_date.is_some());
    }

    #[test]
    fn test_increasing_times_are_declining() {
        let records: Vec<_> = (0..5).map(|i| free50(i * 7, 29.0 + i as f64 * 0.3)).collect();
        let result = PredictionEngine::new().predict(&goal(27.0), &records, day(28));

        assert!(result.improvement_rate < 0.0);
        assert_eq!(result.current_trend, Trend::Declining);
        assert_eq!(result.predicted_date, None);
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn test_goal_already_met_has_no_prediction() {
        let records = vec![free50(0, 30.0), free50(10, 29.0), free50(20, 27.5)];
        let result = PredictionEngine::new().predict(&goal(28.0), &records, day(20));

        assert!(result.required_improvement < 0.0);
        assert!(result.goal_met());
        assert_eq!(result.current_trend, Trend::Improving);
        assert_eq!(result.predicted_date, None);
        assert_eq!(result.days_to_goal, None);
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn test_only_latest_window_is_used() {
        // The oldest two records would make 26.0 the current best
        let mut records = vec![free50(0, 26.0), free50(1, 26.5)];
        records.extend((0..10).map(|i| free50(10 + i, 30.0 - i as f64 * 0.1)));

        let result = PredictionEngine::new().predict(&goal(28.0), &records, day(20));
        assert!((result.required_improvement - (29.1 - 28.0)).abs() < 1e-9);
        assert_eq!(result.current_trend, Trend::Improving);
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let ordered = vec![free50(0, 30.0), free50(10, 29.6), free50(20, 29.1), free50(30, 28.9)];
        let mut shuffled = ordered.clone();
        shuffled.swap(0, 3);
        shuffled.swap(1, 2);

        let engine = PredictionEngine::new();
        let g = goal(28.0);
        assert_eq!(engine.predict(&g, &ordered, day(30)), engine.predict(&g, &shuffled, day(30)));
    }

    #[test]
    fn test_same_day_records_use_default_spacing() {
        let records = vec![free50(0, 30.0), free50(0, 29.5), free50(0, 29.0)];
        let result = PredictionEngine::new().predict(&goal(28.0), &records, day(0));

        assert!((result.improvement_rate - 0.5 / 30.0).abs() < 1e-9);
        assert!(result.improvement_rate.is_finite());
        assert_eq!(result.days_to_goal, Some(60));
    }

    #[test]
    fn test_flat_times_are_stable() {
        let records = vec![free50(0, 29.0), free50(7, 29.0), free50(14, 29.0)];
        let result = PredictionEngine::new().predict(&goal(28.0), &records, day(14));

        assert_eq!(result.improvement_rate, 0.0);
        assert_eq!(result.current_trend, Trend::Stable);
        assert_eq!(result.confidence, 0.0);
        assert!(!result.confidence.is_nan());
    }

    #[test]
    fn test_slow_improvement_is_stable_but_predicted() {
        // 0.1s over 20 days: positive rate under the threshold
        let records = vec![free50(0, 30.0), free50(10, 29.95), free50(20, 29.9)];
        let result = PredictionEngine::new().predict(&goal(29.5), &records, day(20));

        assert!(result.improvement_rate > 0.0);
        assert_eq!(result.current_trend, Trend::Stable);
        assert!(result.predicted_date.is_some());
    }

    #[test]
    fn test_confidence_stays_in_bounds() {
        let engine = PredictionEngine::new();
        let series: [&[f64]; 4] = [
            &[30.0, 29.0, 29.8, 28.0, 29.5, 27.9],
            &[35.0, 30.0, 34.0, 29.0],
            &[30.0, 29.99, 29.98],
            &[31.0, 25.0, 40.0, 24.0, 24.5],
        ];
        for times in series {
            let records: Vec<_> = times
                .iter()
                .enumerate()
                .map(|(i, &t)| free50(i as u64 * 3, t))
                .collect();
            let result = engine.predict(&goal(20.0), &records, day(30));
            assert!((0.0..=100.0).contains(&result.confidence), "{:?}", result);
        }
    }

    #[test]
    fn test_deterministic_for_fixed_today() {
        let records: Vec<_> = (0..8).map(|i| free50(i * 4, 30.0 - (i % 3) as f64 * 0.2 - i as f64 * 0.05)).collect();
        let engine = PredictionEngine::new();
        let g = goal(28.0);

        let first = engine.predict(&g, &records, day(40));
        let second = engine.predict(&g, &records, day(40));
        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_config() {
        let engine = PredictionEngine::with_config(PredictionConfig {
            min_records: 5,
            ..Default::default()
        });
        let records: Vec<_> = (0..4).map(|i| free50(i * 7, 30.0 - i as f64 * 0.5)).collect();
        let result = engine.predict(&goal(28.0), &records, day(21));
        assert_eq!(result.current_trend, Trend::Stable);
        assert_eq!(result.predicted_date, None);
    }

    #[test]
    fn test_config_partial_json_uses_defaults() {
        let config: PredictionConfig = serde_json::from_str(r#"{"window": 6}"#).unwrap();
        assert_eq!(config.window, 6);
        assert_eq!(config.min_records, 3);
        assert_eq!(config.default_spacing_days, 30.0);
    }
}
