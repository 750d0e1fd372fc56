pub mod corpus;
pub mod error;
pub mod io;
pub mod models;
pub mod scan;
pub mod tiers;

pub use corpus::{discover_documents, CorpusConfig, CorpusEntry};
pub use error::ScanError;
pub use io::{load_document, BatchMetadata, BatchOutput, EventTable};
pub use models::{AnnotationDocument, DisfluencyEvent, Interval, NextSegment, Tier, TimeSpan};
pub use scan::{scan_document, ScanConfig, ScanResult};
pub use tiers::{clean_tier, next_qualifying_pause, previous_qualifying_pause, silence_streak_end};
