use serde::{Deserialize, Serialize};

use crate::error::ScanError;

/// Silence marker used by the forced aligner between speech tokens.
pub const SILENCE_LABEL: &str = "sp";

/// A labeled time span within a tier.
///
/// Labels are opaque strings compared exactly (case-sensitive) against the
/// aligner's marker tokens; no interpretation happens at this layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    /// Annotation text for this span - a word, a phone, or a marker
    pub label: String,
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
}

impl Interval {
    /// Create an interval, rejecting empty spans (`start >= end`).
    pub fn new(label: impl Into<String>, start: f64, end: f64) -> Result<Self, ScanError> {
        let label = label.into();
        if start >= end {
            return Err(ScanError::MalformedInterval { label, start, end });
        }
        Ok(Self { label, start, end })
    }

    /// Duration of this interval in seconds
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Whether this is the aligner's silence marker
    pub fn is_silence(&self) -> bool {
        self.label == SILENCE_LABEL
    }

    /// Whether this is a bracketed non-speech annotation, e.g. `{LG}`
    pub fn is_noise(&self) -> bool {
        self.label.contains('{')
    }

    /// Silence or bracketed noise - anything a pause run may absorb
    pub fn is_pause_like(&self) -> bool {
        self.is_silence() || self.is_noise()
    }
}

/// A plain start/end pair lifted out of an interval for event records.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSpan {
    pub start: f64,
    pub end: f64,
}

impl From<&Interval> for TimeSpan {
    fn from(interval: &Interval) -> Self {
        Self {
            start: interval.start,
            end: interval.end,
        }
    }
}
