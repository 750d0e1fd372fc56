use crate::models::Tier;

/// One annotation document: the two time-aligned tiers of a recording plus
/// the identifier its event rows are tagged with.
///
/// Tier order follows the forced-aligner convention: phones first, words
/// second, both on the same absolute time axis.
#[derive(Debug, Clone)]
pub struct AnnotationDocument {
    pub doc_id: String,
    pub phones: Tier,
    pub words: Tier,
}
