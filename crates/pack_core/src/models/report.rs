//! Validation report: the pipeline's observability artifact.

use serde::{Deserialize, Serialize};

/// Outcome of a factual validation pass over one pack.
///
/// Produced fresh per call and never mutated afterwards. A non-empty
/// `errors` list is data for review, not a failure of the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationReport {
    /// Structural validity is guaranteed upstream by the generator loop;
    /// this pass assumes it rather than re-deriving it.
    pub schema_valid: bool,
    pub factual_valid: bool,
    pub errors: Vec<String>,
    pub stats: ReportStats,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportStats {
    pub num_key_events_source: usize,
    pub num_key_moments_generated: usize,
}
