//! Error taxonomy for trialdeck.
//!
//! Defined with `thiserror` so callers can classify failures without string
//! matching. Two conditions are deliberately not errors: a problem pool
//! smaller than the trial size yields a shorter trial, and uncovered test
//! cases are a diagnostic surfaced by the coverage verifier.

use thiserror::Error;

/// Errors produced by corpus loading, trial lookup, and partitioning.
#[derive(Debug, Error)]
pub enum TrialdeckError {
    /// A problem document lacks a train or test field, or cannot be parsed.
    /// The loader excludes the problem and continues.
    #[error("malformed corpus entry '{task_name}': {reason}")]
    MalformedCorpusEntry { task_name: String, reason: String },

    /// A trial number outside [1, trial_count] was requested. Rejected
    /// before any lookup.
    #[error("invalid trial selection {requested}: valid trials are 1-{available}")]
    InvalidTrialSelection { requested: u32, available: usize },

    /// The corpus holds no usable test case slots; partitioning is rejected
    /// before any output is produced.
    #[error("corpus contains no usable test cases")]
    EmptyCorpus,
}
