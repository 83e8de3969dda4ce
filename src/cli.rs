//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::summary::EmptyBucketPolicy;
use clap::Parser;
use std::path::PathBuf;

/// callsum - summarize call-accuracy statistics
///
/// Reads a YAML stats file of per-parameter call counts, groups them by
/// genomic region and prints correct/wrong percentages per confidence
/// bucket.
///
/// Examples:
///   callsum stats.yaml
///   callsum stats.yaml --regions rt,gag,env
///   callsum stats.yaml --empty-buckets error
///   callsum stats.yaml --format json -o summary.json
///   callsum --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Stats file in YAML format
    ///
    /// Not required when using --init-config.
    #[arg(value_name = "INPUT", required_unless_present = "init_config")]
    pub input: Option<PathBuf>,

    /// Region labels to report, in output order (comma-separated)
    ///
    /// Records outside these regions are excluded from the report.
    /// Can also be set via CALLSUM_REGIONS or .callsum.toml.
    #[arg(
        short,
        long,
        value_name = "LIST",
        value_delimiter = ',',
        env = "CALLSUM_REGIONS"
    )]
    pub regions: Option<Vec<String>>,

    /// How to report a confidence bucket with no calls
    ///
    /// Values: zero (report 0% with a no-data marker), skip (omit the
    /// line), error (fail the run).
    #[arg(long, value_name = "POLICY")]
    pub empty_buckets: Option<EmptyBucketPolicy>,

    /// Output format (text, json)
    #[arg(long, default_value = "text", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Write the report to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .callsum.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .callsum.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text (default)
    #[default]
    Text,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if let Some(ref regions) = self.regions {
            if regions.iter().any(|r| r.trim().is_empty()) {
                return Err("Region labels must not be empty".to_string());
            }
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args() -> Args {
        Args {
            input: Some(PathBuf::from("stats.yaml")),
            regions: None,
            empty_buckets: None,
            format: OutputFormat::Text,
            output: None,
            config: None,
            verbose: false,
            quiet: false,
            init_config: false,
        }
    }

    #[test]
    fn test_validation_ok_by_default() {
        assert!(make_args().validate().is_ok());
    }

    #[test]
    fn test_validation_empty_region_label() {
        let mut args = make_args();
        args.regions = Some(vec!["rt".to_string(), "".to_string()]);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }

    #[test]
    fn test_parse_positional_input() {
        let args = Args::try_parse_from(["callsum", "stats.yaml"]).unwrap();
        assert_eq!(args.input, Some(PathBuf::from("stats.yaml")));
        assert_eq!(args.format, OutputFormat::Text);
    }

    #[test]
    fn test_parse_regions_delimiter() {
        let args =
            Args::try_parse_from(["callsum", "stats.yaml", "--regions", "rt,gag,env"]).unwrap();
        assert_eq!(
            args.regions,
            Some(vec!["rt".to_string(), "gag".to_string(), "env".to_string()])
        );
    }

    #[test]
    fn test_input_required_without_init_config() {
        assert!(Args::try_parse_from(["callsum"]).is_err());
        assert!(Args::try_parse_from(["callsum", "--init-config"]).is_ok());
    }
}
