//! Swimming events and logged performance records.

use serde::{Deserialize, Serialize};
use crate::error::ParseError;
use crate::format::is_valid_time;
use crate::id::RecordId;
use crate::Date;

/// Swimming stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stroke {
    /// Front crawl
    Freestyle,
    /// Backstroke
    Backstroke,
    /// Breaststroke
    Breaststroke,
    /// Butterfly
    Butterfly,
}

impl Stroke {
    /// Every stroke, in display order.
    pub const ALL: [Stroke; 4] = [
        Stroke::Freestyle,
        Stroke::Backstroke,
        Stroke::Breaststroke,
        Stroke::Butterfly,
    ];

    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Stroke::Freestyle => "freestyle",
            Stroke::Backstroke => "backstroke",
            Stroke::Breaststroke => "breaststroke",
            Stroke::Butterfly => "butterfly",
        }
    }
}

impl std::fmt::Display for Stroke {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Stroke {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "freestyle" | "free" => Ok(Stroke::Freestyle),
            "backstroke" | "back" => Ok(Stroke::Backstroke),
            "breaststroke" | "breast" => Ok(Stroke::Breaststroke),
            "butterfly" | "fly" => Ok(Stroke::Butterfly),
            other => Err(ParseError::Stroke(other.to_string())),
        }
    }
}

/// Race length in meters.
///
/// Serialized as the bare number of meters; any other number fails to
/// deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Distance {
    /// 25 meters
    M25,
    /// 50 meters
    M50,
    /// 100 meters
    M100,
    /// 200 meters
    M200,
    /// 400 meters
    M400,
    /// 800 meters
    M800,
    /// 1500 meters
    M1500,
}

impl Distance {
    /// Every supported distance, shortest first.
    pub const ALL: [Distance; 7] = [
        Distance::M25,
        Distance::M50,
        Distance::M100,
        Distance::M200,
        Distance::M400,
        Distance::M800,
        Distance::M1500,
    ];

    /// Length in meters.
    pub fn meters(&self) -> u32 {
        match self {
            Distance::M25 => 25,
            Distance::M50 => 50,
            Distance::M100 => 100,
            Distance::M200 => 200,
            Distance::M400 => 400,
            Distance::M800 => 800,
            Distance::M1500 => 1500,
        }
    }
}

impl TryFrom<u32> for Distance {
    type Error = ParseError;

    fn try_from(meters: u32) -> Result<Self, Self::Error> {
        Distance::ALL
            .into_iter()
            .find(|d| d.meters() == meters)
            .ok_or(ParseError::Distance(meters))
    }
}

impl From<Distance> for u32 {
    fn from(distance: Distance) -> Self {
        distance.meters()
    }
}

impl std::fmt::Display for Distance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}m", self.meters())
    }
}

impl std::str::FromStr for Distance {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().trim_end_matches('m');
        let meters: u32 = digits
            .parse()
            .map_err(|_| ParseError::DistanceText(s.to_string()))?;
        Distance::try_from(meters)
    }
}

/// A single logged swim: one stroke over one distance on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRecord {
    /// Unique identifier
    pub id: RecordId,

    /// Stroke swum
    pub stroke: Stroke,

    /// Race length
    pub distance: Distance,

    /// Time in seconds, fractional for hundredths
    pub time: f64,

    /// Day the swim happened
    pub date: Date,

    /// Free-form notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl PerformanceRecord {
    /// Create a new record with a fresh id.
    pub fn new(stroke: Stroke, distance: Distance, time: f64, date: Date) -> Self {
        Self {
            id: RecordId::new(),
            stroke,
            distance,
            time,
            date,
            notes: None,
        }
    }

    /// Attach notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Whether the logged time is finite and positive.
    pub fn is_valid(&self) -> bool {
        is_valid_time(self.time)
    }

    /// Whether this record belongs to the given event.
    pub fn is_event(&self, stroke: Stroke, distance: Distance) -> bool {
        self.stroke == stroke && self.distance == distance
    }
}
