//! trialdeck configuration.
//!
//! A small TOML file with per-field defaults; every constant of the
//! reference deployment (48 trials of 30, seed 12345, the 10-test skip
//! rule) is exposed here rather than hardcoded at call sites.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::corpus::DEFAULT_SKIP_RULE_TEST_COUNT;
use crate::engine::{PartitionConfig, DEFAULT_SEED, DEFAULT_TRIAL_COUNT, DEFAULT_TRIAL_SIZE};

/// Top-level trialdeck configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialdeckConfig {
    /// Number of trials to generate.
    #[serde(default = "default_trial_count")]
    pub trial_count: u32,
    /// Test cases per trial.
    #[serde(default = "default_trial_size")]
    pub trial_size: usize,
    /// Shuffle seed.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Problems with exactly this many test entries have index 0 held out.
    #[serde(default = "default_skip_rule")]
    pub skip_rule_test_count: usize,
    /// Output directory for generated artifacts.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_trial_count() -> u32 {
    DEFAULT_TRIAL_COUNT
}
fn default_trial_size() -> usize {
    DEFAULT_TRIAL_SIZE
}
fn default_seed() -> u64 {
    DEFAULT_SEED
}
fn default_skip_rule() -> usize {
    DEFAULT_SKIP_RULE_TEST_COUNT
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./trialdeck-results")
}

impl Default for TrialdeckConfig {
    fn default() -> Self {
        Self {
            trial_count: default_trial_count(),
            trial_size: default_trial_size(),
            seed: default_seed(),
            skip_rule_test_count: default_skip_rule(),
            output_dir: default_output_dir(),
        }
    }
}

impl TrialdeckConfig {
    /// The engine-facing slice of the configuration.
    pub fn partition_config(&self) -> PartitionConfig {
        PartitionConfig {
            trial_count: self.trial_count,
            trial_size: self.trial_size,
            seed: self.seed,
        }
    }
}

/// Load configuration from well-known paths.
///
/// Search order: `trialdeck.toml` in the current directory, then built-in
/// defaults. Environment variable override: `TRIALDECK_SEED`.
pub fn load_config() -> Result<TrialdeckConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<TrialdeckConfig> {
    load_config_impl(path, std::env::var("TRIALDECK_SEED").ok())
}

fn load_config_impl(
    path: Option<&Path>,
    seed_override: Option<String>,
) -> Result<TrialdeckConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("trialdeck.toml");
        if local.exists() {
            Some(local)
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<TrialdeckConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => TrialdeckConfig::default(),
    };

    if let Some(seed) = seed_override {
        config.seed = seed
            .parse()
            .with_context(|| format!("invalid TRIALDECK_SEED: '{seed}'"))?;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_reference_deployment() {
        let config = TrialdeckConfig::default();
        assert_eq!(config.trial_count, 48);
        assert_eq!(config.trial_size, 30);
        assert_eq!(config.seed, 12345);
        assert_eq!(config.skip_rule_test_count, 10);
    }

    #[test]
    fn parse_partial_config_fills_defaults() {
        let config: TrialdeckConfig = toml::from_str("seed = 99").unwrap();
        assert_eq!(config.seed, 99);
        assert_eq!(config.trial_count, 48);
        assert_eq!(config.trial_size, 30);
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(load_config_impl(Some(&missing), None).is_err());
    }

    #[test]
    fn explicit_path_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trialdeck.toml");
        std::fs::write(&path, "trial_count = 3\ntrial_size = 4\nseed = 1\n").unwrap();

        let config = load_config_impl(Some(&path), None).unwrap();
        assert_eq!(config.trial_count, 3);
        assert_eq!(config.trial_size, 4);
        assert_eq!(config.seed, 1);
        assert_eq!(config.skip_rule_test_count, 10);
    }

    #[test]
    fn seed_override_wins_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trialdeck.toml");
        std::fs::write(&path, "seed = 1\n").unwrap();

        let config = load_config_impl(Some(&path), Some("777".to_string())).unwrap();
        assert_eq!(config.seed, 777);
    }

    #[test]
    fn invalid_seed_override_is_an_error() {
        let result = load_config_impl(None, Some("not-a-number".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn partition_config_projection() {
        let config = TrialdeckConfig {
            trial_count: 5,
            trial_size: 6,
            seed: 7,
            ..TrialdeckConfig::default()
        };
        let pc = config.partition_config();
        assert_eq!(pc.trial_count, 5);
        assert_eq!(pc.trial_size, 6);
        assert_eq!(pc.seed, 7);
    }
}
