use std::path::Path;

use anyhow::{anyhow, Context, Result};
use textgrid::{TextGrid, TierType};

use crate::error::ScanError;
use crate::models::{AnnotationDocument, Interval, Tier};

/// Load a TextGrid file into the two-tier document model.
///
/// The on-disk syntax is the `textgrid` crate's concern; this layer only
/// validates the shape the scanner relies on.
pub fn load_document(path: &Path, doc_id: &str) -> Result<AnnotationDocument> {
    let grid = TextGrid::from_file(path)
        .map_err(|err| anyhow!("Failed to read TextGrid '{}': {err}", path.display()))?;
    document_from_textgrid(&grid, doc_id)
}

/// Convert a parsed TextGrid into an [`AnnotationDocument`].
///
/// Point tiers are ignored; of the interval tiers, the first is the phone
/// tier and the second the word tier, per the forced-aligner convention.
pub fn document_from_textgrid(grid: &TextGrid, doc_id: &str) -> Result<AnnotationDocument> {
    let interval_tiers: Vec<&textgrid::Tier> = grid
        .tiers
        .iter()
        .filter(|tier| matches!(tier.tier_type, TierType::IntervalTier))
        .collect();

    if interval_tiers.len() < 2 {
        return Err(ScanError::TierShape {
            found: interval_tiers.len(),
        }
        .into());
    }

    let phones = convert_tier(interval_tiers[0])
        .with_context(|| format!("Invalid phone tier in {doc_id}"))?;
    let words = convert_tier(interval_tiers[1])
        .with_context(|| format!("Invalid word tier in {doc_id}"))?;

    // Both tiers must cover the same recording
    if (phones.end_time() - words.end_time()).abs() > 1e-6 {
        return Err(ScanError::MisalignedTiers {
            phones_end: phones.end_time(),
            words_end: words.end_time(),
        }
        .into());
    }

    Ok(AnnotationDocument {
        doc_id: doc_id.to_string(),
        phones,
        words,
    })
}

fn convert_tier(tier: &textgrid::Tier) -> Result<Tier, ScanError> {
    let intervals = tier
        .intervals
        .iter()
        .map(|interval| Interval::new(interval.text.clone(), interval.xmin, interval.xmax))
        .collect::<Result<Vec<_>, _>>()?;
    Tier::new(intervals)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interval_tier(name: &str, spans: &[(&str, f64, f64)], xmax: f64) -> textgrid::Tier {
        textgrid::Tier {
            name: name.to_string(),
            tier_type: TierType::IntervalTier,
            xmin: 0.0,
            xmax,
            intervals: spans
                .iter()
                .map(|(text, xmin, xmax)| textgrid::Interval {
                    xmin: *xmin,
                    xmax: *xmax,
                    text: text.to_string(),
                })
                .collect(),
            points: Vec::new(),
        }
    }

    fn grid_with(tiers: Vec<textgrid::Tier>, xmax: f64) -> TextGrid {
        let mut grid = TextGrid::new(0.0, xmax).unwrap();
        for tier in tiers {
            grid.add_tier(tier).unwrap();
        }
        grid
    }

    #[test]
    fn test_document_from_textgrid() {
        let phones = interval_tier(
            "phone",
            &[("sp", 0.0, 0.5), ("AH1", 0.5, 0.7), ("M", 0.7, 1.0)],
            1.0,
        );
        let words = interval_tier("word", &[("sp", 0.0, 0.5), ("UM", 0.5, 1.0)], 1.0);
        let grid = grid_with(vec![phones, words], 1.0);

        let doc = document_from_textgrid(&grid, "PH1-2-3-").unwrap();

        assert_eq!(doc.doc_id, "PH1-2-3-");
        assert_eq!(doc.phones.len(), 3);
        assert_eq!(doc.words.len(), 2);
        assert_eq!(doc.words.intervals()[1].label, "UM");
    }

    #[test]
    fn test_single_tier_document_is_rejected() {
        let words = interval_tier("word", &[("HELLO", 0.0, 1.0)], 1.0);
        let grid = grid_with(vec![words], 1.0);

        let err = document_from_textgrid(&grid, "doc").unwrap_err();
        let scan_err = err.downcast_ref::<ScanError>().unwrap();
        assert!(matches!(scan_err, ScanError::TierShape { found: 1 }));
    }

    #[test]
    fn test_misaligned_tiers_are_rejected() {
        let phones = interval_tier("phone", &[("sp", 0.0, 1.0)], 1.0);
        let words = interval_tier("word", &[("sp", 0.0, 0.5)], 0.5);
        let grid = grid_with(vec![phones, words], 1.0);

        let err = document_from_textgrid(&grid, "doc").unwrap_err();
        let scan_err = err.downcast_ref::<ScanError>().unwrap();
        assert!(matches!(scan_err, ScanError::MisalignedTiers { .. }));
    }

    #[test]
    fn test_malformed_interval_is_rejected() {
        let tier = interval_tier("phone", &[("AH1", 0.5, 0.5)], 1.0);

        assert!(matches!(
            convert_tier(&tier),
            Err(ScanError::MalformedInterval { .. })
        ));
    }
}
