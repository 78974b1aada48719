//! Parse errors for user-facing values.

/// Errors produced when parsing strokes, distances, workout types or times.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    /// Unknown stroke name
    #[error("unknown stroke: {0}")]
    Stroke(String),

    /// Distance outside the supported race lengths
    #[error("unsupported distance: {0}m")]
    Distance(u32),

    /// Distance that is not a number of meters
    #[error("invalid distance: {0}")]
    DistanceText(String),

    /// Unknown workout type
    #[error("unknown workout type: {0}")]
    WorkoutType(String),

    /// Malformed or non-positive time
    #[error("invalid time: {0}")]
    Time(String),
}
