//! The `trialdeck show` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use trialdeck_core::hash::hash_task_name;
use trialdeck_core::model::TrialSet;

pub fn execute(trials_path: PathBuf, trial_number: u32) -> Result<()> {
    let trials = TrialSet::load_json(&trials_path)?;
    let trial = trials.get(trial_number)?;

    println!("Trial {} ({} test cases)", trial.trial_number, trial.len());

    // Task names are anonymized for display, same as the evaluator sees them.
    let mut table = Table::new();
    table.set_header(vec!["#", "Task", "Test"]);
    for (i, slot) in trial.test_cases.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(hash_task_name(&slot.task_name)),
            Cell::new(slot.test_index),
        ]);
    }
    println!("{table}");

    Ok(())
}
