//! @ai:module:intent CLI for aggregating fio benchmark results
//! @ai:module:layer presentation

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fio_report::{
    config::ReportConfig,
    metrics::{aggregator::SUMMARY_HEADER, AggregatedReport},
    pipeline::{Pipeline, PipelineOutcome},
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_FILE: &str = "fio-report.toml";
const DEFAULT_LOG_FILTER: &str = "fio_report=info";

#[derive(Parser)]
#[command(name = "fio-report")]
#[command(about = "Aggregate fio JSON results from repeated runs into a CSV report")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse run files and write the report
    Parse {
        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of run files to expect
        #[arg(short, long)]
        iterations: Option<u32>,

        /// Prefix of the run files (e.g. 'fio-output' reads fio-output1.json, fio-output2.json, ...)
        #[arg(short = 'p', long)]
        input_prefix: Option<String>,

        /// CSV file to write the aggregated results to
        #[arg(short = 'o', long)]
        csv_output: Option<PathBuf>,

        /// Also write the aggregated results as JSON
        #[arg(long)]
        json_output: Option<PathBuf>,
    },

    /// Initialize default configuration
    Init {
        /// Output path for config file
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(rust_log.as_deref()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Parse {
            config,
            iterations,
            input_prefix,
            csv_output,
            json_output,
        } => parse_runs(ParseArgs {
            config,
            iterations,
            input_prefix,
            csv_output,
            json_output,
        }),
        Commands::Init { output } => init_config(output),
    }
}

struct ParseArgs {
    config: Option<PathBuf>,
    iterations: Option<u32>,
    input_prefix: Option<String>,
    csv_output: Option<PathBuf>,
    json_output: Option<PathBuf>,
}

/// @ai:intent Log filter from RUST_LOG, or info for this crate when unset or invalid
/// @ai:effects pure
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// @ai:intent Parse all runs and write reports
/// @ai:effects fs:read, fs:write, io
fn parse_runs(args: ParseArgs) -> Result<()> {
    let mut config = load_or_default_config(args.config)?;

    if let Some(iterations) = args.iterations {
        config.iterations = iterations;
    }
    if let Some(prefix) = args.input_prefix {
        config.input_prefix = prefix;
    }
    if let Some(csv_output) = args.csv_output {
        config.csv_output = csv_output;
    }
    if args.json_output.is_some() {
        config.json_output = args.json_output;
    }

    let csv_output = config.csv_output.clone();
    let outcome = Pipeline::new(config)
        .run()
        .with_context(|| format!("Failed to generate report {}", csv_output.display()))?;

    match outcome {
        PipelineOutcome::Written { report, attempted } => {
            print_summary(&report, attempted);
            println!("Results successfully written to {}", csv_output.display());
        }
        PipelineOutcome::NoData { attempted } => {
            println!(
                "No metrics extracted from any of {} fio output files. Nothing written.",
                attempted
            );
        }
    }

    Ok(())
}

/// @ai:intent Write a default configuration file
/// @ai:effects fs:write
fn init_config(output: PathBuf) -> Result<()> {
    ReportConfig::default()
        .save(&output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!("Configuration saved to {}", output.display());
    Ok(())
}

/// @ai:intent Load configuration or use defaults
/// @ai:effects fs:read
fn load_or_default_config(path: Option<PathBuf>) -> Result<ReportConfig> {
    match path {
        Some(p) => Ok(ReportConfig::load(&p)?),
        None => {
            let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);

            if default_path.exists() {
                Ok(ReportConfig::load(&default_path)?)
            } else {
                Ok(ReportConfig::default())
            }
        }
    }
}

/// @ai:intent Print the aggregated table to console
/// @ai:effects io
fn print_summary(report: &AggregatedReport, attempted: u32) {
    println!();
    println!("fio Results ({} of {} runs)", report.runs.len(), attempted);
    println!("{}", "=".repeat(30));
    println!();

    println!(
        "{:<28} {:>12} {:>10} {:>6} {:>12} {:>12}",
        SUMMARY_HEADER[0],
        SUMMARY_HEADER[1],
        SUMMARY_HEADER[2],
        SUMMARY_HEADER[3],
        SUMMARY_HEADER[4],
        SUMMARY_HEADER[5]
    );
    println!("{}", "-".repeat(85));

    for cells in report.summary_table() {
        println!(
            "{:<28} {:>12} {:>10} {:>6} {:>12} {:>12}",
            cells[0], cells[1], cells[2], cells[3], cells[4], cells[5]
        );
    }

    println!();
}
