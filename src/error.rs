use thiserror::Error;

/// Errors raised while building tiers or scanning a single document.
///
/// All of these are fatal for the document that produced them; the batch
/// driver logs and skips the document rather than aborting the run.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("malformed interval {label:?}: start {start} is not before end {end}")]
    MalformedInterval {
        label: String,
        start: f64,
        end: f64,
    },

    #[error("tier intervals out of order at index {index}")]
    UnorderedTier { index: usize },

    #[error("document has {found} interval tier(s), need at least 2 (phones, words)")]
    TierShape { found: usize },

    #[error("phone and word tiers end at different times ({phones_end} vs {words_end})")]
    MisalignedTiers { phones_end: f64, words_end: f64 },

    #[error("no {what} segment found at {time:.3}s")]
    MissingSegment { what: &'static str, time: f64 },
}
