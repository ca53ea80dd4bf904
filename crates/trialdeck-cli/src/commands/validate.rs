//! The `trialdeck validate` command.

use std::path::PathBuf;

use anyhow::Result;

use trialdeck_core::config::load_config_from;
use trialdeck_core::corpus::load_corpus_directory;

pub fn execute(corpus_path: PathBuf, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let loaded = load_corpus_directory(&corpus_path, config.skip_rule_test_count)?;

    println!(
        "Corpus: {} problems, {} usable test cases",
        loaded.corpus.len(),
        loaded.corpus.total_slots()
    );

    for w in &loaded.warnings {
        println!("  [{}] WARNING: {}", w.task_path, w.message);
    }

    if loaded.warnings.is_empty() {
        println!("Corpus valid.");
    } else {
        println!("\n{} warning(s) found.", loaded.warnings.len());
    }

    Ok(())
}
