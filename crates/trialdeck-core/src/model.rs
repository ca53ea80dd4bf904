//! Core data model types for trialdeck.
//!
//! These are the fundamental types the entire trialdeck system uses to
//! represent problems, test case slots, and trial assignments. The wire
//! format of `Trial` and `TestCaseSlot` (camelCase fields, a bare JSON
//! array of trials) is fixed: downstream evaluator pages consume it as-is.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::TrialdeckError;
use crate::hash::hash_task_name;

/// A 2-D cell-value table. Opaque to the partitioning engine, which only
/// ever tracks identity, never contents.
pub type Grid = Vec<Vec<u8>>;

/// One (input, expected-output) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridPair {
    pub input: Grid,
    pub output: Grid,
}

/// A named task definition: training examples plus held-out test cases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    /// Stable index into the corpus; assignment order at load time.
    pub problem_index: usize,
    /// Category the task file was enumerated under.
    pub category: String,
    /// Human-readable name, `category/file`.
    pub task_name: String,
    /// Forward-slash path relative to the corpus root's parent.
    pub task_path: String,
    /// Training pairs shown to the evaluator.
    pub train: Vec<GridPair>,
    /// Full test pair list, including any held-out index.
    pub test: Vec<GridPair>,
    /// Indices into `test` that trials may draw from. Invariant: every
    /// entry is a valid index into `test`, unique within the problem.
    pub usable_test_indices: Vec<usize>,
}

/// Composite identity of one usable test case, for usage bookkeeping.
/// Equality is structural.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct AssignmentKey {
    pub problem_index: usize,
    pub test_index: usize,
}

impl fmt::Display for AssignmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.problem_index, self.test_index)
    }
}

impl From<&TestCaseSlot> for AssignmentKey {
    fn from(slot: &TestCaseSlot) -> Self {
        Self {
            problem_index: slot.problem_index,
            test_index: slot.test_index,
        }
    }
}

/// One test case of one problem, as presented in a trial. Each slot embeds
/// the owning problem's training pairs so an evaluator page can render the
/// assignment without touching the corpus again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCaseSlot {
    pub problem_index: usize,
    pub test_index: usize,
    pub task_path: String,
    pub task_name: String,
    pub train: Vec<GridPair>,
    pub test_case: GridPair,
}

/// The full ordered corpus. Invariant: every (problem_index, test_index)
/// pair is unique across the corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusIndex {
    pub problems: Vec<Problem>,
}

impl CorpusIndex {
    pub fn new(problems: Vec<Problem>) -> Self {
        Self { problems }
    }

    /// Number of problems.
    pub fn len(&self) -> usize {
        self.problems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    /// Total usable test case slots across all problems.
    pub fn total_slots(&self) -> usize {
        self.problems
            .iter()
            .map(|p| p.usable_test_indices.len())
            .sum()
    }

    /// Flatten into one ordered slot list: problem order, then test-index
    /// order within each problem.
    pub fn flatten(&self) -> Vec<TestCaseSlot> {
        let mut slots = Vec::with_capacity(self.total_slots());
        for problem in &self.problems {
            for &test_index in &problem.usable_test_indices {
                slots.push(TestCaseSlot {
                    problem_index: problem.problem_index,
                    test_index,
                    task_path: problem.task_path.clone(),
                    task_name: problem.task_name.clone(),
                    train: problem.train.clone(),
                    test_case: problem.test[test_index].clone(),
                });
            }
        }
        slots
    }

    /// Every assignment key in the corpus, in flatten order.
    pub fn assignment_keys(&self) -> Vec<AssignmentKey> {
        self.problems
            .iter()
            .flat_map(|p| {
                p.usable_test_indices.iter().map(|&test_index| AssignmentKey {
                    problem_index: p.problem_index,
                    test_index,
                })
            })
            .collect()
    }

    /// Stable identity digest over task names and usable indices, for
    /// caller-owned memoization. Small-N identity, not a checksum.
    pub fn fingerprint(&self) -> String {
        let mut acc = String::new();
        for problem in &self.problems {
            acc.push_str(&problem.task_name);
            acc.push(':');
            for index in &problem.usable_test_indices {
                acc.push_str(&index.to_string());
                acc.push(',');
            }
            acc.push(';');
        }
        hash_task_name(&acc)
    }
}

/// A fixed-size batch of test cases drawn from distinct problems.
/// Invariant: no two entries share a `problem_index`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trial {
    /// 1-based trial number.
    pub trial_number: u32,
    pub test_cases: Vec<TestCaseSlot>,
}

impl Trial {
    pub fn len(&self) -> usize {
        self.test_cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.test_cases.is_empty()
    }

    /// Distinct problems referenced by this trial.
    pub fn problem_indices(&self) -> HashSet<usize> {
        self.test_cases.iter().map(|s| s.problem_index).collect()
    }
}

/// The complete trial assignment table. Immutable once produced; persisted
/// as a bare JSON array of trials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrialSet {
    pub trials: Vec<Trial>,
}

impl TrialSet {
    pub fn len(&self) -> usize {
        self.trials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trials.is_empty()
    }

    /// Look up a trial by its 1-based number. Out-of-range numbers are
    /// rejected before any lookup.
    pub fn get(&self, trial_number: u32) -> Result<&Trial, TrialdeckError> {
        if trial_number < 1 || trial_number as usize > self.trials.len() {
            return Err(TrialdeckError::InvalidTrialSelection {
                requested: trial_number,
                available: self.trials.len(),
            });
        }
        Ok(&self.trials[trial_number as usize - 1])
    }

    /// Total assignments across all trials.
    pub fn total_assignments(&self) -> usize {
        self.trials.iter().map(Trial::len).sum()
    }

    /// Save the trial set as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize trial set")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write trial set to {}", path.display()))?;
        Ok(())
    }

    /// Load a trial set from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read trial set from {}", path.display()))?;
        let set: TrialSet =
            serde_json::from_str(&content).context("failed to parse trial set JSON")?;
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(problem_index: usize, test_index: usize) -> TestCaseSlot {
        TestCaseSlot {
            problem_index,
            test_index,
            task_path: format!("corpus/Cat/task{problem_index}.json"),
            task_name: format!("Cat/task{problem_index}.json"),
            train: vec![GridPair {
                input: vec![vec![0]],
                output: vec![vec![1]],
            }],
            test_case: GridPair {
                input: vec![vec![1, 2]],
                output: vec![vec![3, 4]],
            },
        }
    }

    #[test]
    fn slot_wire_format_is_camel_case() {
        let json = serde_json::to_string(&slot(3, 1)).unwrap();
        assert!(json.contains("\"problemIndex\":3"));
        assert!(json.contains("\"testIndex\":1"));
        assert!(json.contains("\"taskPath\""));
        assert!(json.contains("\"taskName\""));
        assert!(json.contains("\"testCase\""));
    }

    #[test]
    fn trial_set_serializes_as_bare_array() {
        let set = TrialSet {
            trials: vec![Trial {
                trial_number: 1,
                test_cases: vec![slot(0, 0)],
            }],
        };
        let json = serde_json::to_string(&set).unwrap();
        assert!(json.starts_with('['));
        assert!(json.contains("\"trialNumber\":1"));

        let back: TrialSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }

    #[test]
    fn trial_lookup_validates_range() {
        let set = TrialSet {
            trials: vec![
                Trial {
                    trial_number: 1,
                    test_cases: vec![],
                },
                Trial {
                    trial_number: 2,
                    test_cases: vec![slot(0, 0)],
                },
            ],
        };
        assert_eq!(set.get(2).unwrap().trial_number, 2);
        assert!(matches!(
            set.get(0),
            Err(TrialdeckError::InvalidTrialSelection { requested: 0, available: 2 })
        ));
        assert!(matches!(
            set.get(3),
            Err(TrialdeckError::InvalidTrialSelection { requested: 3, available: 2 })
        ));
    }

    #[test]
    fn assignment_key_display_matches_bookkeeping_format() {
        let key = AssignmentKey {
            problem_index: 12,
            test_index: 4,
        };
        assert_eq!(key.to_string(), "12_4");
    }

    #[test]
    fn fingerprint_tracks_usable_indices() {
        let problem = Problem {
            problem_index: 0,
            category: "Cat".into(),
            task_name: "Cat/task0.json".into(),
            task_path: "corpus/Cat/task0.json".into(),
            train: vec![],
            test: vec![
                GridPair {
                    input: vec![vec![0]],
                    output: vec![vec![0]],
                },
                GridPair {
                    input: vec![vec![1]],
                    output: vec![vec![1]],
                },
            ],
            usable_test_indices: vec![0, 1],
        };
        let a = CorpusIndex::new(vec![problem.clone()]);

        let mut narrowed = problem;
        narrowed.usable_test_indices = vec![1];
        let b = CorpusIndex::new(vec![narrowed]);

        assert_ne!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint(), a.fingerprint());
    }

    #[test]
    fn json_roundtrip_via_file() {
        let set = TrialSet {
            trials: vec![Trial {
                trial_number: 1,
                test_cases: vec![slot(0, 1), slot(1, 0)],
            }],
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trials.json");

        set.save_json(&path).unwrap();
        let loaded = TrialSet::load_json(&path).unwrap();
        assert_eq!(loaded, set);
    }
}
