//! Analyze command implementation.
//!
//! The analyze command:
//! 1. Opens the trace file
//! 2. Streams access records through the tracker in one pass
//! 3. Derives contention metrics
//! 4. Optionally writes hotspot listings
//! 5. Renders the text report

use crate::aggregator::{AccessTracker, ContentionMetrics, CountingMode, HotspotTally};
use crate::commands::models::AnalyzeArgs;
use crate::output::{render_report, write_hotspots};
use crate::parser::{LineStats, TraceReader};
use crate::utils::error::AnalyzeError;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

/// State left after one pass over a trace
#[derive(Debug)]
pub struct Analysis {
    pub tracker: AccessTracker,
    pub hotspots: Option<HotspotTally>,
    pub lines: LineStats,
}

impl Analysis {
    pub fn metrics(&self) -> ContentionMetrics {
        ContentionMetrics::from_tracker(&self.tracker)
    }
}

/// Run the single analysis pass over any buffered source
///
/// **Public** - shared by the command and by tests
///
/// # Arguments
/// * `reader` - Trace contents
/// * `mode` - Crossing accounting rule
/// * `collect_hotspots` - Also tally reads/writes per address and source
///
/// # Errors
/// * `AnalyzeError::ReadFailed` - I/O error while reading
pub fn analyze_reader<R: BufRead>(
    reader: R,
    mode: CountingMode,
    collect_hotspots: bool,
) -> Result<Analysis, AnalyzeError> {
    let mut tracker = AccessTracker::new(mode);
    let mut hotspots = collect_hotspots.then(HotspotTally::new);
    let mut events = TraceReader::new(reader);

    for event in events.by_ref() {
        let event = event?;
        let thread = tracker.record(&event);

        if let Some(tally) = hotspots.as_mut() {
            tally.record(&event, thread);
        }
    }

    Ok(Analysis {
        tracker,
        hotspots,
        lines: events.stats(),
    })
}

/// Open a trace file and run the analysis pass
///
/// # Errors
/// * `AnalyzeError::FileNotFound` - path does not exist
/// * `AnalyzeError::ReadFailed` - open or read failure
pub fn analyze_file(
    path: &Path,
    mode: CountingMode,
    collect_hotspots: bool,
) -> Result<Analysis, AnalyzeError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => AnalyzeError::FileNotFound(path.display().to_string()),
        _ => AnalyzeError::ReadFailed(e),
    })?;

    if let Ok(metadata) = file.metadata() {
        info!("Analyzing {} bytes...", metadata.len());
    }

    analyze_reader(BufReader::new(file), mode, collect_hotspots)
}

/// Execute the analyze command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// The rendered report. Nothing is returned (or printed) unless the whole
/// trace was read successfully.
///
/// # Errors
/// * Missing or unreadable trace file
/// * Hotspot listing write failures
pub fn execute_analyze(args: &AnalyzeArgs) -> Result<String> {
    let start_time = Instant::now();

    let analysis = analyze_file(
        &args.trace_path,
        args.counting_mode,
        args.hotspots_dir.is_some(),
    )
    .with_context(|| format!("Failed to analyze {}", args.trace_path.display()))?;

    let lines = analysis.lines;
    debug!(
        "Read {} lines, {} access records",
        lines.lines, lines.records
    );
    if lines.malformed > 0 {
        warn!("Skipped {} malformed access records", lines.malformed);
    }

    let metrics = analysis.metrics();
    info!(
        "{} ({:?} counting)",
        metrics.summary(),
        analysis.tracker.mode()
    );

    if let (Some(dir), Some(tally)) = (&args.hotspots_dir, &analysis.hotspots) {
        debug!(
            "Hotspot tally: {} addresses, {} source locations",
            tally.address_count(),
            tally.source_count()
        );
        let written = write_hotspots(dir, tally, args.top)
            .context("Failed to write hotspot listings")?;
        info!("✓ {} hotspot listings written to: {}", written.len(), dir.display());
    }

    let report = render_report(&args.trace_path.display().to_string(), &metrics);

    info!(
        "Analysis completed in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );
    Ok(report)
}

/// Validate analyze arguments
///
/// **Public** - can be called before execute_analyze for early validation
pub fn validate_args(args: &AnalyzeArgs) -> Result<()> {
    if args.trace_path.as_os_str().is_empty() {
        anyhow::bail!("Trace path cannot be empty");
    }

    if !args.trace_path.exists() {
        anyhow::bail!("File '{}' does not exist", args.trace_path.display());
    }

    if args.trace_path.is_dir() {
        anyhow::bail!("'{}' is a directory", args.trace_path.display());
    }

    if args.top == Some(0) {
        anyhow::bail!("--top must be at least 1");
    }

    if args.top.is_some() && args.hotspots_dir.is_none() {
        warn!("--top has no effect without --hotspots");
    }

    Ok(())
}
