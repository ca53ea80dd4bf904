//! Exact-match submission grading and the submission log.
//!
//! Grading is structural equality with no partial credit. A submitted row
//! longer than the reference row passes when the prefix matches; this is
//! the comparison the deployed evaluator has always run, and verdicts must
//! stay comparable across old and new exports.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::hash::hash_task_name;
use crate::model::Grid;

/// Compare a submitted output grid against the reference.
///
/// Equal row count; every submitted row must match the reference row
/// element-wise at every column up to the reference row's length. Missing
/// rows, short rows, or any differing cell yield `false`.
pub fn grade(reference: &Grid, submitted: &Grid) -> bool {
    if reference.len() != submitted.len() {
        return false;
    }
    reference.iter().zip(submitted).all(|(ref_row, sub_row)| {
        ref_row
            .iter()
            .enumerate()
            .all(|(col, cell)| sub_row.get(col) == Some(cell))
    })
}

/// One graded presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    /// Original task name.
    pub task_name: String,
    /// Anonymized identity shown to the evaluator.
    pub task_name_hash: String,
    /// Test index within the owning problem.
    pub test_index: usize,
    pub input_grid: Grid,
    pub submitted_output: Grid,
    pub reference_output: Grid,
    pub is_correct: bool,
    /// Free-text rationale entered by the evaluator.
    #[serde(default)]
    pub rule_description: String,
    pub timestamp: DateTime<Utc>,
    /// Present only for submissions made inside a trial.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trial_number: Option<u32>,
    /// Position within the trial, 0-based.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trial_task_index: Option<usize>,
}

impl SubmissionRecord {
    /// Build a graded record for one presentation, stamped now.
    pub fn new(
        task_name: &str,
        test_index: usize,
        input_grid: Grid,
        submitted_output: Grid,
        reference_output: Grid,
        rule_description: &str,
    ) -> Self {
        let is_correct = grade(&reference_output, &submitted_output);
        Self {
            task_name: task_name.to_string(),
            task_name_hash: hash_task_name(task_name),
            test_index,
            input_grid,
            submitted_output,
            reference_output,
            is_correct,
            rule_description: rule_description.to_string(),
            timestamp: Utc::now(),
            trial_number: None,
            trial_task_index: None,
        }
    }

    /// Tag the record with its trial position.
    pub fn in_trial(mut self, trial_number: u32, trial_task_index: usize) -> Self {
        self.trial_number = Some(trial_number);
        self.trial_task_index = Some(trial_task_index);
        self
    }
}

/// Accumulates submission records over one evaluation session.
#[derive(Debug, Clone, Default)]
pub struct SubmissionLog {
    records: Vec<SubmissionRecord>,
}

impl SubmissionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: SubmissionRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[SubmissionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Snapshot the log for export, optionally wrapped with a trial id.
    pub fn export(&self, trial_id: Option<u32>) -> SubmissionExport {
        match trial_id {
            Some(trial_id) => SubmissionExport::Wrapped {
                trial_id,
                submissions: self.records.clone(),
            },
            None => SubmissionExport::Bare(self.records.clone()),
        }
    }
}

/// Persisted form of a submission log: a `{trial_id, submissions}` document
/// when the session ran a trial, a bare array otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubmissionExport {
    Wrapped {
        trial_id: u32,
        submissions: Vec<SubmissionRecord>,
    },
    Bare(Vec<SubmissionRecord>),
}

impl SubmissionExport {
    pub fn submissions(&self) -> &[SubmissionRecord] {
        match self {
            SubmissionExport::Wrapped { submissions, .. } => submissions,
            SubmissionExport::Bare(submissions) => submissions,
        }
    }

    pub fn trial_id(&self) -> Option<u32> {
        match self {
            SubmissionExport::Wrapped { trial_id, .. } => Some(*trial_id),
            SubmissionExport::Bare(_) => None,
        }
    }

    /// Save the export as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json =
            serde_json::to_string_pretty(self).context("failed to serialize submissions")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write submissions to {}", path.display()))?;
        Ok(())
    }

    /// Load an export from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read submissions from {}", path.display()))?;
        let export: SubmissionExport =
            serde_json::from_str(&content).context("failed to parse submissions JSON")?;
        Ok(export)
    }
}
