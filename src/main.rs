//! Trace Contention CLI
//!
//! Computes multi-threaded access statistics from a race-detector trace.

use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;
use env_logger::Env;
use std::path::PathBuf;

use trace_contention::aggregator::CountingMode;
use trace_contention::commands::{execute_analyze, validate_args, AnalyzeArgs};

/// Trace Contention - multi-threaded access statistics for memory traces
#[derive(Parser, Debug)]
#[command(name = "trace-analyze")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Trace file to analyze
    file: PathBuf,

    /// Count the access that first shares a location once instead of twice
    #[arg(long)]
    single_count: bool,

    /// Also write read/write hotspot listings into this directory
    #[arg(long, value_name = "DIR")]
    hotspots: Option<PathBuf>,

    /// Number of rows kept in each hotspot listing
    #[arg(long, value_name = "N")]
    top: Option<usize>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    // Usage errors exit with status 1, help and version with 0
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    };

    // Setup logging (stderr, stdout carries only the report)
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let args = AnalyzeArgs {
        trace_path: cli.file,
        counting_mode: if cli.single_count {
            CountingMode::SingleCount
        } else {
            CountingMode::Compatible
        },
        hotspots_dir: cli.hotspots,
        top: cli.top,
    };

    validate_args(&args)?;

    let report = execute_analyze(&args)?;
    print!("{}", report);

    Ok(())
}
