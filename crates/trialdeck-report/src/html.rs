//! HTML summary generator.
//!
//! Produces a self-contained HTML file with all CSS inlined: one coverage
//! dashboard plus a per-trial assignment table with anonymized task names.

use std::path::Path;

use anyhow::{Context, Result};

use trialdeck_core::coverage::CoverageReport;
use trialdeck_core::hash::hash_task_name;
use trialdeck_core::model::TrialSet;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML summary from a trial set and its coverage report.
pub fn generate_html(trials: &TrialSet, coverage: &CoverageReport) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str("<title>trialdeck report</title>\n");
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str("<h1>trialdeck report</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">{} trials | {} assignments | {} test case slots</p>\n",
        trials.len(),
        trials.total_assignments(),
        coverage.total_keys,
    ));
    html.push_str("</header>\n");

    // Coverage dashboard
    let coverage_class = if coverage.is_fully_covered() {
        "pass"
    } else {
        "fail"
    };
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Coverage</h2>\n");
    html.push_str("<table class=\"summary\">\n");
    html.push_str(
        "<thead><tr><th>Covered</th><th>Uncovered</th><th>Min use</th><th>Max use</th></tr></thead>\n",
    );
    html.push_str(&format!(
        "<tbody><tr><td class=\"{}\">{}/{}</td><td>{}</td><td>{}</td><td>{}</td></tr></tbody>\n",
        coverage_class,
        coverage.covered(),
        coverage.total_keys,
        coverage.uncovered.len(),
        coverage.min_usage,
        coverage.max_usage,
    ));
    html.push_str("</table>\n");

    if !coverage.uncovered.is_empty() {
        html.push_str("<details>\n<summary>Uncovered test cases</summary>\n<ul>\n");
        for key in &coverage.uncovered {
            html.push_str(&format!(
                "<li>problem {} test {}</li>\n",
                key.problem_index, key.test_index
            ));
        }
        html.push_str("</ul>\n</details>\n");
    }
    html.push_str("</section>\n");

    // Per-trial assignments
    html.push_str("<section class=\"results\">\n");
    html.push_str("<h2>Trials</h2>\n");
    for trial in &trials.trials {
        html.push_str(&format!(
            "<details>\n<summary>Trial {} ({} test cases)</summary>\n",
            trial.trial_number,
            trial.len()
        ));
        html.push_str("<table class=\"results-table\">\n");
        html.push_str("<thead><tr><th>#</th><th>Task</th><th>Test</th></tr></thead>\n<tbody>\n");
        for (i, slot) in trial.test_cases.iter().enumerate() {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                i + 1,
                html_escape(&hash_task_name(&slot.task_name)),
                slot.test_index,
            ));
        }
        html.push_str("</tbody></table>\n</details>\n");
    }
    html.push_str("</section>\n");

    html.push_str("</body>\n</html>\n");
    html
}

/// Generate and write the HTML summary to a file.
pub fn write_html_report(trials: &TrialSet, coverage: &CoverageReport, path: &Path) -> Result<()> {
    let html = generate_html(trials, coverage);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)
        .with_context(|| format!("failed to write HTML report to {}", path.display()))?;
    Ok(())
}

const CSS: &str = r#"
body { font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", sans-serif;
       margin: 2rem auto; max-width: 60rem; color: #1a1a1a; }
header h1 { margin-bottom: 0.25rem; }
.meta { color: #666; margin-top: 0; }
h2 { border-bottom: 1px solid #ddd; padding-bottom: 0.25rem; }
table { border-collapse: collapse; margin: 0.5rem 0 1rem; }
th, td { border: 1px solid #ddd; padding: 0.3rem 0.7rem; text-align: left; }
thead { background: #f5f5f5; }
td.pass { color: #1a7f37; font-weight: 600; }
td.fail { color: #cf222e; font-weight: 600; }
details { margin: 0.5rem 0; }
summary { cursor: pointer; }
"#;
