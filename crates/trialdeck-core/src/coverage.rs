//! Post-hoc coverage verification.
//!
//! Diagnostic only: the verifier never mutates the trial set and never
//! blocks production of the result. Uncovered entries are surfaced as a
//! count/list for operator visibility.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::{AssignmentKey, CorpusIndex, TrialSet};

/// Outcome of scanning a trial set against its corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageReport {
    /// Assignment keys known to the corpus (plus any foreign keys found in
    /// the trial set).
    pub total_keys: usize,
    /// Assignments across all trials.
    pub total_assignments: usize,
    /// Keys that appear in no trial, sorted.
    pub uncovered: Vec<AssignmentKey>,
    /// Highest per-key usage.
    pub max_usage: u32,
    /// Lowest per-key usage (0 whenever anything is uncovered).
    pub min_usage: u32,
}

impl CoverageReport {
    pub fn is_fully_covered(&self) -> bool {
        self.uncovered.is_empty()
    }

    pub fn covered(&self) -> usize {
        self.total_keys - self.uncovered.len()
    }
}

/// Count how many trials include each corpus assignment key.
///
/// Per-trial uniqueness makes this recount equal to the engine's transient
/// usage counter, so the verifier can run against a trial set loaded from
/// disk long after generation.
pub fn verify_coverage(corpus: &CorpusIndex, trials: &TrialSet) -> CoverageReport {
    let mut usage: HashMap<AssignmentKey, u32> = corpus
        .assignment_keys()
        .into_iter()
        .map(|key| (key, 0))
        .collect();

    for trial in &trials.trials {
        for slot in &trial.test_cases {
            *usage.entry(AssignmentKey::from(slot)).or_default() += 1;
        }
    }

    let mut uncovered: Vec<AssignmentKey> = usage
        .iter()
        .filter(|(_, count)| **count == 0)
        .map(|(key, _)| *key)
        .collect();
    uncovered.sort_unstable();

    let total_assignments = usage.values().map(|c| *c as usize).sum();
    let max_usage = usage.values().copied().max().unwrap_or(0);
    let min_usage = usage.values().copied().min().unwrap_or(0);

    if !uncovered.is_empty() {
        tracing::warn!(
            count = uncovered.len(),
            "test cases were not used in any trial"
        );
    }

    CoverageReport {
        total_keys: usage.len(),
        total_assignments,
        uncovered,
        max_usage,
        min_usage,
    }
}
