//! The `trialdeck generate` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use trialdeck_core::config::load_config_from;
use trialdeck_core::corpus::load_corpus_directory;
use trialdeck_core::coverage::{verify_coverage, CoverageReport};
use trialdeck_core::engine::{partition, PartitionConfig};
use trialdeck_core::model::TrialSet;
use trialdeck_report::embed::write_embedded_js;
use trialdeck_report::html::write_html_report;

#[allow(clippy::too_many_arguments)]
pub fn execute(
    corpus_path: PathBuf,
    output: PathBuf,
    seed: Option<u64>,
    trial_count: Option<u32>,
    trial_size: Option<usize>,
    embed_js: Option<PathBuf>,
    html: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let mut config = load_config_from(config_path.as_deref())?;
    if let Some(seed) = seed {
        config.seed = seed;
    }
    if let Some(count) = trial_count {
        config.trial_count = count;
    }
    if let Some(size) = trial_size {
        config.trial_size = size;
    }

    anyhow::ensure!(config.trial_count >= 1, "trial count must be at least 1");
    anyhow::ensure!(config.trial_size >= 1, "trial size must be at least 1");

    let loaded = load_corpus_directory(&corpus_path, config.skip_rule_test_count)?;
    for w in &loaded.warnings {
        eprintln!("  WARNING: {}: {}", w.task_path, w.message);
    }
    let corpus = loaded.corpus;
    eprintln!(
        "Loaded {} problems ({} usable test cases)",
        corpus.len(),
        corpus.total_slots()
    );

    let partition_config = config.partition_config();
    eprintln!(
        "Generating {} trials of {} (seed {})",
        partition_config.trial_count, partition_config.trial_size, partition_config.seed
    );

    let trials = partition(&corpus, &partition_config)?;
    for trial in &trials.trials {
        eprintln!("Trial {}: {} test cases", trial.trial_number, trial.len());
    }

    let coverage = verify_coverage(&corpus, &trials);
    print_summary(&trials, &coverage, &partition_config);

    trials.save_json(&output)?;
    eprintln!("Trial set saved to: {}", output.display());

    if let Some(path) = embed_js {
        write_embedded_js(&trials, &path)?;
        eprintln!("Embedded data saved to: {}", path.display());
    }
    if let Some(path) = html {
        write_html_report(&trials, &coverage, &path)?;
        eprintln!("HTML report: {}", path.display());
    }

    if coverage.is_fully_covered() {
        println!("All test cases are covered in the trials.");
    } else {
        println!(
            "Warning: {} test cases were not used in any trial",
            coverage.uncovered.len()
        );
    }

    Ok(())
}

fn print_summary(trials: &TrialSet, coverage: &CoverageReport, config: &PartitionConfig) {
    let mut table = Table::new();
    table.set_header(vec![
        "Trials",
        "Trial size",
        "Seed",
        "Assignments",
        "Covered",
        "Max reuse",
    ]);
    table.add_row(vec![
        Cell::new(trials.len()),
        Cell::new(config.trial_size),
        Cell::new(config.seed),
        Cell::new(trials.total_assignments()),
        Cell::new(format!("{}/{}", coverage.covered(), coverage.total_keys)),
        Cell::new(coverage.max_usage),
    ]);

    eprintln!("\n{table}");
}
