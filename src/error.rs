//! Per-record error taxonomy for the cleaning pipeline.
//!
//! Every variant here is a *skip*, not an abort: the pipeline catches these
//! at the record boundary, logs them, and moves on. Setup failures (missing
//! input directory, output directory that cannot be created) travel as
//! `anyhow::Error` instead and terminate the run.

use thiserror::Error;

/// Why a single input record was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// The input file is not valid JSON, or its top level is not an object.
    #[error("invalid JSON: {0}")]
    ParseError(String),

    /// No accepted date format matched and heuristic extraction failed.
    #[error("unparseable timestamp: {0}")]
    UnparseableTimestamp(String),

    /// More than one single-digit year repair lands inside the plausible
    /// window, so the correction would be a guess.
    #[error("ambiguous year {year}: plausible repairs {candidates:?}")]
    AmbiguousYear { year: i32, candidates: Vec<i32> },
}

impl RecordError {
    /// Short reason code used in skip summaries.
    pub fn reason(&self) -> &'static str {
        match self {
            RecordError::ParseError(_) => "ParseError",
            RecordError::UnparseableTimestamp(_) => "UnparseableTimestamp",
            RecordError::AmbiguousYear { .. } => "AmbiguousYear",
        }
    }
}
