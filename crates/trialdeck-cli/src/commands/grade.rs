//! The `trialdeck grade` command.
//!
//! Re-grades a submissions export against the reference grids embedded in
//! each record, so stored verdicts can be audited after the fact.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use trialdeck_core::grader::{grade, SubmissionExport};

pub fn execute(submissions_path: PathBuf, fail_on_mismatch: bool) -> Result<()> {
    let export = SubmissionExport::load_json(&submissions_path)?;
    let records = export.submissions();

    match export.trial_id() {
        Some(trial_id) => println!("Trial {}: {} submissions", trial_id, records.len()),
        None => println!("{} submissions", records.len()),
    }

    let mut correct = 0usize;
    let mut mismatches = 0usize;

    let mut table = Table::new();
    table.set_header(vec!["Task", "Test", "Stored", "Regraded"]);
    for record in records {
        let regraded = grade(&record.reference_output, &record.submitted_output);
        if regraded {
            correct += 1;
        }
        if regraded != record.is_correct {
            mismatches += 1;
        }
        table.add_row(vec![
            Cell::new(&record.task_name_hash),
            Cell::new(record.test_index),
            Cell::new(verdict(record.is_correct)),
            Cell::new(verdict(regraded)),
        ]);
    }
    println!("{table}");
    println!("Correct: {}/{}", correct, records.len());

    if mismatches > 0 {
        println!("{mismatches} stored verdict(s) disagree with re-grading");
        if fail_on_mismatch {
            anyhow::bail!("{mismatches} verdict mismatch(es)");
        }
    }

    Ok(())
}

fn verdict(correct: bool) -> &'static str {
    if correct {
        "correct"
    } else {
        "incorrect"
    }
}
