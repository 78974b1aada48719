//! Shareable summaries and social links.
//!
//! Builds text and URLs only; nothing here opens a browser or talks to the
//! network.

use aquatrack_core::{format_date, format_time, Distance, Goal, PerformanceRecord, Stroke, Workout};
use crate::stats::personal_best;
use serde::Serialize;

const IMAGE_BASE: &str = "https://api.aquatrack.app/share";

/// What a shareable result celebrates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShareKind {
    /// A personal best
    Time,
    /// A finished workout
    Workout,
    /// A goal reached
    Achievement,
    /// Improvement over time
    Progress,
}

/// Where to share.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SharePlatform {
    /// Twitter / X intent link
    Twitter,
    /// Facebook sharer link
    Facebook,
    /// WhatsApp click-to-chat link
    WhatsApp,
    /// Plain text for the clipboard
    Copy,
}

impl std::str::FromStr for SharePlatform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "twitter" | "x" => Ok(SharePlatform::Twitter),
            "facebook" => Ok(SharePlatform::Facebook),
            "whatsapp" => Ok(SharePlatform::WhatsApp),
            "copy" => Ok(SharePlatform::Copy),
            other => Err(format!("unknown platform: {}", other)),
        }
    }
}

/// Title, description and preview image for a post.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShareableResult {
    /// What is being shared
    pub kind: ShareKind,
    /// Headline
    pub title: String,
    /// Body text with hashtags
    pub description: String,
    /// Preview image URL
    pub image_url: String,
}

/// Share a new personal best.
pub fn share_time(record: &PerformanceRecord) -> ShareableResult {
    ShareableResult {
        kind: ShareKind::Time,
        title: "New Personal Best! 🏊‍♂️".to_string(),
        description: format!(
            "Just swam {}m {} in {} on {}! #Swimming #PersonalBest #AquaTrack",
            record.distance.meters(),
            record.stroke,
            format_time(record.time),
            format_date(record.date),
        ),
        image_url: format!(
            "{}/time?stroke={}&distance={}&time={}",
            IMAGE_BASE,
            record.stroke,
            record.distance.meters(),
            record.time
        ),
    }
}

/// Share a completed workout.
pub fn share_workout(workout: &Workout) -> ShareableResult {
    ShareableResult {
        kind: ShareKind::Workout,
        title: "Training Complete! 💪".to_string(),
        description: format!(
            "Completed a {} workout: {}m in {} minutes on {}! #Swimming #Training #AquaTrack",
            workout.workout_type,
            workout.distance_meters,
            workout.duration_minutes,
            format_date(workout.date),
        ),
        image_url: format!(
            "{}/workout?type={}&distance={}&duration={}",
            IMAGE_BASE, workout.workout_type, workout.distance_meters, workout.duration_minutes
        ),
    }
}

/// Share an achieved goal.
pub fn share_achievement(goal_name: &str, record: &PerformanceRecord) -> ShareableResult {
    ShareableResult {
        kind: ShareKind::Achievement,
        title: "Goal Achieved! 🎯".to_string(),
        description: format!(
            "Just achieved my goal of {} with a time of {}! Hard work pays off! #Swimming #GoalAchieved #AquaTrack",
            goal_name,
            format_time(record.time),
        ),
        image_url: format!(
            "{}/achievement?goal={}&time={}",
            IMAGE_BASE,
            urlencoding::encode(goal_name),
            record.time
        ),
    }
}

/// Name a goal the way achievement posts do, e.g. `50m freestyle under 00:28.00`.
pub fn goal_name(goal: &Goal) -> String {
    format!(
        "{}m {} under {}",
        goal.distance.meters(),
        goal.stroke,
        format_time(goal.target_time)
    )
}

/// Share a reached goal, quoting the fastest logged swim for its event.
///
/// Returns `None` when nothing has been logged for the goal's event yet.
pub fn share_goal_achieved(goal: &Goal, records: &[PerformanceRecord]) -> Option<ShareableResult> {
    personal_best(records, goal.stroke, goal.distance)
        .map(|best| share_achievement(&goal_name(goal), best))
}

/// Share an improvement over a period.
pub fn share_progress(stroke: Stroke, distance: Distance, improvement: f64) -> ShareableResult {
    ShareableResult {
        kind: ShareKind::Progress,
        title: "Swimming Progress! 📈".to_string(),
        description: format!(
            "Improved my {}m {} by {} this month! Consistency is key! #Swimming #Progress #AquaTrack",
            distance.meters(),
            stroke,
            format_time(improvement),
        ),
        image_url: format!(
            "{}/progress?stroke={}&distance={}&improvement={}",
            IMAGE_BASE,
            stroke,
            distance.meters(),
            improvement
        ),
    }
}

/// Post body: title, blank line, description.
pub fn share_text(result: &ShareableResult) -> String {
    format!("{}\n\n{}", result.title, result.description)
}

/// Link that opens a share dialog on `platform`, or the plain text for `Copy`.
///
/// `page_url` is the page Facebook should attach the quote to.
pub fn share_url(result: &ShareableResult, platform: SharePlatform, page_url: &str) -> String {
    let text = share_text(result);
    match platform {
        SharePlatform::Twitter => format!(
            "https://twitter.com/intent/tweet?text={}",
            urlencoding::encode(&text)
        ),
        SharePlatform::Facebook => format!(
            "https://www.facebook.com/sharer/sharer.php?u={}&quote={}",
            urlencoding::encode(page_url),
            urlencoding::encode(&text)
        ),
        SharePlatform::WhatsApp => format!("https://wa.me/?text={}", urlencoding::encode(&text)),
        SharePlatform::Copy => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aquatrack_core::{Date, WorkoutType};

    fn record() -> PerformanceRecord {
        PerformanceRecord::new(
            Stroke::Freestyle,
            Distance::M100,
            58.42,
            Date::from_ymd_opt(2024, 7, 4).unwrap(),
        )
    }

    #[test]
    fn test_share_time_text() {
        let result = share_time(&record());
        assert_eq!(result.kind, ShareKind::Time);
        assert_eq!(
            result.description,
            "Just swam 100m freestyle in 00:58.42 on Jul 04, 2024! #Swimming #PersonalBest #AquaTrack"
        );
        assert!(result.image_url.ends_with("time?stroke=freestyle&distance=100&time=58.42"));
    }

    #[test]
    fn test_share_workout_text() {
        let workout = Workout::new(Date::from_ymd_opt(2024, 7, 5).unwrap(), WorkoutType::Technique, 50, 1800);
        let result = share_workout(&workout);
        assert!(result.description.starts_with("Completed a technique workout: 1800m in 50 minutes"));
    }

    #[test]
    fn test_achievement_encodes_goal_name() {
        let result = share_achievement("100m free < 58s", &record());
        assert!(result.image_url.contains("goal=100m%20free%20%3C%2058s"));
    }

    #[test]
    fn test_goal_achieved_quotes_personal_best() {
        let goal = Goal::new(Stroke::Freestyle, Distance::M100, 59.0);
        let slower = PerformanceRecord::new(
            Stroke::Freestyle,
            Distance::M100,
            60.1,
            Date::from_ymd_opt(2024, 6, 1).unwrap(),
        );
        let other_event = PerformanceRecord::new(
            Stroke::Backstroke,
            Distance::M100,
            55.0,
            Date::from_ymd_opt(2024, 6, 2).unwrap(),
        );
        let records = vec![slower, record(), other_event];

        let result = share_goal_achieved(&goal, &records).unwrap();
        assert_eq!(result.kind, ShareKind::Achievement);
        assert_eq!(
            result.description,
            "Just achieved my goal of 100m freestyle under 00:59.00 with a time of 00:58.42! \
             Hard work pays off! #Swimming #GoalAchieved #AquaTrack"
        );
    }

    #[test]
    fn test_goal_achieved_needs_a_logged_swim() {
        let goal = Goal::new(Stroke::Butterfly, Distance::M50, 27.0);
        assert!(share_goal_achieved(&goal, &[record()]).is_none());
    }

    #[test]
    fn test_share_urls() {
        let result = share_progress(Stroke::Butterfly, Distance::M50, 1.2);
        let text = share_text(&result);

        let twitter = share_url(&result, SharePlatform::Twitter, "");
        assert!(twitter.starts_with("https://twitter.com/intent/tweet?text="));
        assert!(!twitter.contains(' '));
        assert!(twitter.contains("%0A%0A"));

        let facebook = share_url(&result, SharePlatform::Facebook, "https://aquatrack.app/");
        assert!(facebook.contains("u=https%3A%2F%2Faquatrack.app%2F&quote="));

        assert!(share_url(&result, SharePlatform::WhatsApp, "").starts_with("https://wa.me/?text="));
        assert_eq!(share_url(&result, SharePlatform::Copy, ""), text);
    }

    #[test]
    fn test_platform_parsing() {
        assert_eq!("WhatsApp".parse::<SharePlatform>().unwrap(), SharePlatform::WhatsApp);
        assert!("myspace".parse::<SharePlatform>().is_err());
    }
}
