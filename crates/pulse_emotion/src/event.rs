//! Emotion labels and events

use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// The five emotion classes produced by the upstream classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionLabel {
    Excited,
    Happy,
    Anxious,
    Sad,
    Calm,
}

impl EmotionLabel {
    /// All labels, in classifier output order
    pub const ALL: [EmotionLabel; 5] = [
        Self::Excited,
        Self::Happy,
        Self::Anxious,
        Self::Sad,
        Self::Calm,
    ];

    /// Lowercase wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excited => "excited",
            Self::Happy => "happy",
            Self::Anxious => "anxious",
            Self::Sad => "sad",
            Self::Calm => "calm",
        }
    }
}

impl fmt::Display for EmotionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a wire string names no known emotion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLabel(pub String);

impl fmt::Display for UnknownLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown emotion label: {:?}", self.0)
    }
}

impl std::error::Error for UnknownLabel {}

impl FromStr for EmotionLabel {
    type Err = UnknownLabel;

    /// Case-insensitive parse of the wire label
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "excited" => Ok(Self::Excited),
            "happy" => Ok(Self::Happy),
            "anxious" => Ok(Self::Anxious),
            "sad" => Ok(Self::Sad),
            "calm" => Ok(Self::Calm),
            _ => Err(UnknownLabel(s.to_string())),
        }
    }
}

/// An immutable classified emotion reading
///
/// No identity beyond its position in the emission sequence; every consumer
/// keeps its own "last seen" state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmotionEvent {
    pub label: EmotionLabel,
    /// Classifier confidence, clamped to `[0, 1]`
    pub confidence: f32,
}

impl EmotionEvent {
    /// Create an event, clamping confidence into `[0, 1]`
    pub fn new(label: EmotionLabel, confidence: f32) -> Self {
        Self {
            label,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }
}
