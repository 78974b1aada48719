//! Motivational messages keyed on the current trend.

use aquatrack_core::{PredictionResult, Trend};
use rand::Rng;

const STABLE: [&str; 3] = [
    "Your times are consistent. Try mixing up your training to break through! 🔄",
    "Steady performance! Consider adding some speed work to reach your goal faster. ⚡",
    "Consistency is key! A few focused sessions could unlock your next breakthrough. 🔓",
];

const DECLINING: [&str; 3] = [
    "Don't worry about recent times. Every swimmer has ups and downs! 📈",
    "Consider reviewing your training plan or taking a recovery week. 🛌",
    "Focus on technique work to get back on track to your goal! 🎯",
];

fn improving(prediction: &PredictionResult) -> [String; 3] {
    let on_track = match prediction.days_to_goal {
        Some(days) => format!(
            "Great progress! You're on track to achieve your goal in {} days! 🏊‍♂️",
            days
        ),
        None => "Great progress! Your times keep dropping! 🏊‍♂️".to_string(),
    };
    [
        on_track,
        "Excellent improvement rate! Keep up the consistent training! 💪".to_string(),
        "You're swimming faster every session. Goal achievement is within reach! 🎯".to_string(),
    ]
}

/// Pick one of three messages for the prediction's trend using `rng`.
pub fn motivational_message_with<R: Rng + ?Sized>(prediction: &PredictionResult, rng: &mut R) -> String {
    let pool: [String; 3] = match prediction.current_trend {
        Trend::Improving => improving(prediction),
        Trend::Stable => STABLE.map(String::from),
        Trend::Declining => DECLINING.map(String::from),
    };
    let pick = rng.gen_range(0..pool.len());
    pool[pick].clone()
}

/// Pick a message using the thread-local RNG.
pub fn motivational_message(prediction: &PredictionResult) -> String {
    motivational_message_with(prediction, &mut rand::thread_rng())
}
