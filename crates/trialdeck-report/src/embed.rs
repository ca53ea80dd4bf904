//! Embedded JavaScript data file writer.
//!
//! Evaluator pages opened over the `file://` protocol cannot fetch
//! `trials.json`, so the trial set is also emitted as a script that
//! assigns a single global the page picks up instead.

use std::path::Path;

use anyhow::{Context, Result};

use trialdeck_core::model::TrialSet;

/// Render the trial set as an embeddable script.
pub fn generate_embedded_js(trials: &TrialSet) -> Result<String> {
    let json = serde_json::to_string_pretty(trials).context("failed to serialize trial set")?;
    Ok(format!(
        "// Auto-generated trials data\nvar TRIALS_DATA = {json};\n"
    ))
}

/// Write the embedded data file.
pub fn write_embedded_js(trials: &TrialSet, path: &Path) -> Result<()> {
    let js = generate_embedded_js(trials)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, js)
        .with_context(|| format!("failed to write embedded data to {}", path.display()))?;
    Ok(())
}
