//! Trial partitioning engine.
//!
//! Deals the flattened, seed-shuffled corpus into a fixed number of trials
//! with a two-pass greedy allocation: pass 1 spends never-yet-assigned test
//! cases first so full-corpus coverage lands as early as possible, pass 2
//! tops trials up by allowing reuse. Both passes hold the hard invariant
//! that a trial never contains two test cases from the same problem.
//!
//! The engine is a pure function of (corpus, config): no global state, no
//! I/O, and re-invocation with the same inputs reproduces the trial set
//! byte for byte.

use std::collections::{HashMap, HashSet};

use crate::error::TrialdeckError;
use crate::model::{AssignmentKey, CorpusIndex, TestCaseSlot, Trial, TrialSet};
use crate::rng::shuffled;

/// Trials in the reference deployment.
pub const DEFAULT_TRIAL_COUNT: u32 = 48;
/// Test cases per trial in the reference deployment.
pub const DEFAULT_TRIAL_SIZE: usize = 30;
/// Shuffle seed in the reference deployment.
pub const DEFAULT_SEED: u64 = 12345;

/// Configuration for one partitioning run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionConfig {
    /// Number of trials to produce.
    pub trial_count: u32,
    /// Target test cases per trial.
    pub trial_size: usize,
    /// Seed for the canonical shuffle.
    pub seed: u64,
}

impl Default for PartitionConfig {
    fn default() -> Self {
        Self {
            trial_count: DEFAULT_TRIAL_COUNT,
            trial_size: DEFAULT_TRIAL_SIZE,
            seed: DEFAULT_SEED,
        }
    }
}

/// Partition the corpus into trials.
///
/// The flattened slot list is shuffled exactly once; that order is the
/// canonical iteration order for every pass of every trial, and is also
/// the only tie-break (no least-used preference, no re-randomization —
/// changing either would change the reproducible output for a fixed seed).
///
/// A corpus with fewer distinct problems than `trial_size` yields shorter
/// trials; this is an accepted boundary condition, not an error.
pub fn partition(
    corpus: &CorpusIndex,
    config: &PartitionConfig,
) -> Result<TrialSet, TrialdeckError> {
    if corpus.total_slots() == 0 {
        return Err(TrialdeckError::EmptyCorpus);
    }

    let slots = shuffled(&corpus.flatten(), config.seed);

    let mut usage: HashMap<AssignmentKey, u32> = slots
        .iter()
        .map(|slot| (AssignmentKey::from(slot), 0))
        .collect();

    let mut trials = Vec::with_capacity(config.trial_count as usize);
    for trial_number in 1..=config.trial_count {
        let mut used_problems: HashSet<usize> = HashSet::new();
        let mut test_cases: Vec<TestCaseSlot> = Vec::with_capacity(config.trial_size);

        // Pass 1: fresh slots only, in shuffle order.
        for slot in &slots {
            if test_cases.len() >= config.trial_size {
                break;
            }
            if used_problems.contains(&slot.problem_index) {
                continue;
            }
            let key = AssignmentKey::from(slot);
            if usage[&key] == 0 {
                test_cases.push(slot.clone());
                *usage.entry(key).or_default() += 1;
                used_problems.insert(slot.problem_index);
            }
        }

        // Pass 2: allow reuse; the no-duplicate-problem constraint still holds.
        if test_cases.len() < config.trial_size {
            for slot in &slots {
                if test_cases.len() >= config.trial_size {
                    break;
                }
                if used_problems.contains(&slot.problem_index) {
                    continue;
                }
                test_cases.push(slot.clone());
                *usage.entry(AssignmentKey::from(slot)).or_default() += 1;
                used_problems.insert(slot.problem_index);
            }
        }

        if test_cases.len() < config.trial_size {
            tracing::debug!(
                trial_number,
                size = test_cases.len(),
                target = config.trial_size,
                "trial underfilled: fewer distinct problems than trial size"
            );
        }

        trials.push(Trial {
            trial_number,
            test_cases,
        });
    }

    Ok(TrialSet { trials })
}

/// Caller-owned memoization over [`partition`].
///
/// Keyed by corpus fingerprint plus the full configuration. Caching is an
/// explicit decision at the call site; the engine itself stays a pure
/// function with no process-wide state.
#[derive(Debug, Default)]
pub struct MemoPartitioner {
    cache: HashMap<(String, u32, usize, u64), TrialSet>,
}

impl MemoPartitioner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Partition, reusing a cached result when the same corpus and
    /// configuration were already seen.
    pub fn partition(
        &mut self,
        corpus: &CorpusIndex,
        config: &PartitionConfig,
    ) -> Result<TrialSet, TrialdeckError> {
        let key = (
            corpus.fingerprint(),
            config.trial_count,
            config.trial_size,
            config.seed,
        );
        if let Some(cached) = self.cache.get(&key) {
            return Ok(cached.clone());
        }
        let trials = partition(corpus, config)?;
        self.cache.insert(key, trials.clone());
        Ok(trials)
    }

    /// Distinct (corpus, config) pairs currently cached.
    pub fn cached_runs(&self) -> usize {
        self.cache.len()
    }
}
