//! callsum - Call-Accuracy Summarizer
//!
//! A CLI tool that aggregates genomic-call accuracy counts from a YAML
//! stats file and prints correct/wrong percentages per confidence bucket,
//! grouped by region and ordered by quality and k-mer parameters.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (missing file, malformed data, empty-bucket error)

mod cli;
mod config;
mod loader;
mod models;
mod report;
mod summary;

use anyhow::{Context, Result};
use cli::{Args, OutputFormat};
use config::Config;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        match handle_init_config() {
            Ok(()) => std::process::exit(0),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }

    // Initialize logging
    init_logging(&args);

    debug!("callsum v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    // Run the summarizer
    match run_summary(args) {
        Ok(()) => {}
        Err(e) => {
            error!("Summary failed: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .callsum.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(".callsum.toml");

    if path.exists() {
        anyhow::bail!(".callsum.toml already exists. Remove it first or edit it manually.");
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .callsum.toml")?;

    eprintln!("Created .callsum.toml with default settings.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
///
/// Logs go to stderr so the report on stdout stays clean.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the complete summarize workflow.
fn run_summary(args: Args) -> Result<()> {
    // Load configuration
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    let input = args
        .input
        .as_deref()
        .context("No input file given")?;

    // Step 1: Load the stats records
    let records = loader::load_stats(input)?;
    info!("Loaded {} records from {}", records.len(), input.display());

    // Step 2: Aggregate into per-region bucket summaries
    let summary = summary::summarize(
        &records,
        &config.general.regions,
        config.report.empty_buckets,
    )?;

    if summary.skipped_records > 0 {
        warn!(
            "{} records matched none of the configured regions ({})",
            summary.skipped_records,
            config.general.regions.join(", ")
        );
    }

    // Step 3: Render and write the report
    let output = match args.format {
        OutputFormat::Text => report::generate_text_report(&summary),
        OutputFormat::Json => report::generate_json_report(&summary)?,
    };

    report::write_report(&output, args.output.as_deref())?;

    if let Some(ref path) = args.output {
        info!("Report saved to {}", path.display());
    }

    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from .callsum.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
