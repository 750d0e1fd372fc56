use serde::{Deserialize, Serialize};

use crate::models::TimeSpan;

/// The phone interval immediately following a token in the cleaned phone
/// tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NextSegment {
    pub label: String,
    pub start: f64,
    pub end: f64,
}

/// One detected disfluency token with its acoustic and chunk context.
///
/// Created during a single scan pass over one document, appended to the
/// batch output, and never mutated afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisfluencyEvent {
    /// Output token label, possibly merged ("AND_UM", "UM_UH")
    pub word: String,
    /// Word-tier start time in seconds
    pub start_time: f64,
    /// Word-tier end time in seconds
    pub end_time: f64,
    /// Vowel sub-interval from the raw phone tier
    pub vowel: TimeSpan,
    /// Nasal sub-interval, present only for "UM" tokens
    pub nasal: Option<TimeSpan>,
    /// Next segment in the cleaned phone tier, absent past the tier's end
    pub next_seg: Option<NextSegment>,
    /// End of the qualifying pause preceding the token's chunk
    pub chunk_start: f64,
    /// Start of the qualifying pause following the token's chunk
    pub chunk_end: f64,
    /// Running count of non-pause word-tier tokens up to and including this one
    pub n_words: usize,
    /// Source document identifier
    pub doc_id: String,
}
