//! The `trialdeck verify` command.

use std::path::PathBuf;

use anyhow::Result;

use trialdeck_core::config::load_config_from;
use trialdeck_core::corpus::load_corpus_directory;
use trialdeck_core::coverage::verify_coverage;
use trialdeck_core::model::TrialSet;

pub fn execute(
    corpus_path: PathBuf,
    trials_path: PathBuf,
    fail_on_uncovered: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let loaded = load_corpus_directory(&corpus_path, config.skip_rule_test_count)?;
    let trials = TrialSet::load_json(&trials_path)?;

    let coverage = verify_coverage(&loaded.corpus, &trials);

    println!("Trials: {}", trials.len());
    println!("Test case slots: {}", coverage.total_keys);
    println!("Assignments: {}", coverage.total_assignments);
    println!("Covered: {}/{}", coverage.covered(), coverage.total_keys);
    println!("Reuse: min {}, max {}", coverage.min_usage, coverage.max_usage);

    if coverage.is_fully_covered() {
        println!("All test cases are covered in the trials.");
    } else {
        println!("{} uncovered test cases:", coverage.uncovered.len());
        for key in &coverage.uncovered {
            println!("  problem {} test {}", key.problem_index, key.test_index);
        }
        if fail_on_uncovered {
            anyhow::bail!("{} test cases uncovered", coverage.uncovered.len());
        }
    }

    Ok(())
}
