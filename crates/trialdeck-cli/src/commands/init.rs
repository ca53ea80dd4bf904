//! The `trialdeck init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("trialdeck.toml").exists() {
        println!("trialdeck.toml already exists, skipping.");
    } else {
        std::fs::write("trialdeck.toml", SAMPLE_CONFIG)?;
        println!("Created trialdeck.toml");
    }

    println!("\nNext steps:");
    println!("  1. Point --corpus at a directory of task JSON files");
    println!("  2. Run: trialdeck validate --corpus <dir>");
    println!("  3. Run: trialdeck generate --corpus <dir>");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# trialdeck configuration

trial_count = 48
trial_size = 30
seed = 12345

# Problems with exactly this many test entries have test 0 held out.
skip_rule_test_count = 10

output_dir = "./trialdeck-results"
"#;
