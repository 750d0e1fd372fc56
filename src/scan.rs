use tracing::debug;

use crate::error::ScanError;
use crate::models::{AnnotationDocument, DisfluencyEvent, NextSegment, TimeSpan};
use crate::tiers::{clean_tier, next_qualifying_pause, previous_qualifying_pause};

/// Configuration for a document scan
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Minimum silence duration in seconds for a pause to bound a chunk
    pub min_pause_duration: f64,
    /// Offset added to boundary queries so they land inside the following
    /// interval rather than on a shared edge
    pub boundary_epsilon: f64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            min_pause_duration: 0.2,
            boundary_epsilon: 0.001,
        }
    }
}

/// Result of scanning one document
#[derive(Debug)]
pub struct ScanResult {
    /// Detected events in word-tier order
    pub events: Vec<DisfluencyEvent>,
    /// Total non-pause tokens in the cleaned word tier
    pub word_count: usize,
}

/// Scan one document for "UM"/"UH" tokens and gather per-event context.
///
/// Both tiers are cleaned first; the scan walks the cleaned word tier while
/// vowel and nasal sub-segments come from the raw phone tier and the next
/// segment from the cleaned one. Cleaned tiers are not index-aligned with
/// each other, so every cross-tier hop is a time lookup.
///
/// Merge rules, applied per target token:
/// - a preceding "AND" prefixes the output label ("AND_UM" / "AND_UH");
/// - "UM" directly followed by "UH" emits one merged "UM_UH" event with the
///   timing of the "UM" (the merge overrides any AND_ prefix);
/// - the "UH" half of such a pair is suppressed, recognized by its
///   preceding "UM".
///
/// A vowel that cannot be located, or a missing nasal after an "UM", aborts
/// the document: timing data is never fabricated.
pub fn scan_document(
    doc: &AnnotationDocument,
    config: &ScanConfig,
) -> Result<ScanResult, ScanError> {
    let clean_words = clean_tier(&doc.words);
    let clean_phones = clean_tier(&doc.phones);

    let mut events = Vec::new();
    let mut word_count = 0usize;

    let words = clean_words.intervals();
    for (i, word) in words.iter().enumerate() {
        if !word.is_silence() {
            word_count += 1;
        }
        if word.label != "UM" && word.label != "UH" {
            continue;
        }

        let prev_label = i.checked_sub(1).map(|p| words[p].label.as_str());
        let next_label = words.get(i + 1).map(|iv| iv.label.as_str());

        // The UH half of a merged UM UH pair was already emitted with the
        // preceding UM
        if word.label == "UH" && prev_label == Some("UM") {
            continue;
        }

        let mut out_word = if prev_label == Some("AND") {
            format!("AND_{}", word.label)
        } else {
            word.label.clone()
        };
        // The merge overrides the AND_ prefix
        if word.label == "UM" && next_label == Some("UH") {
            out_word = "UM_UH".to_string();
        }

        let (vowel_index, vowel) = doc
            .phones
            .segment_after(word.start, config.boundary_epsilon)
            .ok_or(ScanError::MissingSegment {
                what: "vowel",
                time: word.start,
            })?;

        let nasal = if word.label == "UM" {
            let interval =
                doc.phones
                    .get(vowel_index + 1)
                    .ok_or(ScanError::MissingSegment {
                        what: "nasal",
                        time: vowel.end,
                    })?;
            Some(TimeSpan::from(interval))
        } else {
            None
        };

        let next_seg = clean_phones
            .segment_after(word.end, config.boundary_epsilon)
            .map(|(_, interval)| NextSegment {
                label: interval.label.clone(),
                start: interval.start,
                end: interval.end,
            });

        let before = previous_qualifying_pause(&clean_words, i, config.min_pause_duration);
        let after = next_qualifying_pause(&clean_words, i, config.min_pause_duration);
        let chunk_start = words[before].end;
        let chunk_end = words[after].start;

        debug!(word = %out_word, start = word.start, "disfluency event");

        events.push(DisfluencyEvent {
            word: out_word,
            start_time: word.start,
            end_time: word.end,
            vowel: TimeSpan::from(vowel),
            nasal,
            next_seg,
            chunk_start,
            chunk_end,
            n_words: word_count,
            doc_id: doc.doc_id.clone(),
        });
    }

    Ok(ScanResult { events, word_count })
}
