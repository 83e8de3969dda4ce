//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.callsum.toml` files.

use crate::summary::EmptyBucketPolicy;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Region labels to report, in output order.
    #[serde(default = "default_regions")]
    pub regions: Vec<String>,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            regions: default_regions(),
            verbose: false,
        }
    }
}

fn default_regions() -> Vec<String> {
    vec!["rt".to_string(), "gag".to_string()]
}

/// Report generation settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    /// How to report a confidence bucket with no calls.
    #[serde(default)]
    pub empty_buckets: EmptyBucketPolicy,
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(".callsum.toml");

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref regions) = args.regions {
            self.general.regions = regions.clone();
        }

        if let Some(policy) = args.empty_buckets {
            self.report.empty_buckets = policy;
        }

        // Flags always override
        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.regions, vec!["rt", "gag"]);
        assert_eq!(config.report.empty_buckets, EmptyBucketPolicy::Zero);
        assert!(!config.general.verbose);
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[general]
regions = ["rt", "gag", "env"]
verbose = true

[report]
empty_buckets = "error"
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.general.regions, vec!["rt", "gag", "env"]);
        assert!(config.general.verbose);
        assert_eq!(config.report.empty_buckets, EmptyBucketPolicy::Error);
    }

    #[test]
    fn test_merge_cli_takes_precedence() {
        let mut config = Config::default();
        let mut args = crate::cli::Args {
            input: None,
            regions: Some(vec!["env".to_string()]),
            empty_buckets: Some(EmptyBucketPolicy::Skip),
            format: crate::cli::OutputFormat::Text,
            output: None,
            config: None,
            verbose: false,
            quiet: false,
            init_config: false,
        };

        config.merge_with_args(&args);
        assert_eq!(config.general.regions, vec!["env"]);
        assert_eq!(config.report.empty_buckets, EmptyBucketPolicy::Skip);

        // Absent CLI values leave config values untouched.
        args.regions = None;
        args.empty_buckets = None;
        config.merge_with_args(&args);
        assert_eq!(config.general.regions, vec!["env"]);
        assert_eq!(config.report.empty_buckets, EmptyBucketPolicy::Skip);
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.is_empty());
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[report]"));
        assert!(toml_str.contains("rt"));
    }
}
