//! Plain-text contention report.
//!
//! The layout is fixed so reports from different instrumentation builds can
//! be compared line by line:
//!
//! ```text
//! Analyzing trace.log
//!
//! Operations:                R W
//! Threads:                   2
//!
//! Unique addresses:          1
//! Accesses:                  2
//!
//! Unique addresses (byte):   4
//! Accesses (byte):           8
//!
//! Addresses with multi-threaded access:          1          (100.00% of total)
//! Multi-threaded accesses:                       2          (100.00% of total)
//!
//! Addresses with multi-threaded access (byte):   4          (100.00% of total)
//! Multi-threaded accesses (byte):                8          (100.00% of total)
//! ```

use crate::aggregator::{ContentionMetrics, Ratio};
use crate::utils::config::{COUNT_FIELD_WIDTH, MULTI_LABEL_WIDTH, SUMMARY_LABEL_WIDTH};
use std::fmt::Display;

/// Render the report for one analyzed trace
///
/// **Public** - main entry point for report output
pub fn render_report(trace_name: &str, metrics: &ContentionMetrics) -> String {
    let mut out = String::new();

    out.push_str(&format!("Analyzing {}\n", trace_name));
    out.push('\n');
    out.push_str(&summary_line("Operations:", metrics.operations.join(" ")));
    out.push_str(&summary_line("Threads:", metrics.threads));
    out.push('\n');
    out.push_str(&summary_line("Unique addresses:", metrics.unique_addresses));
    out.push_str(&summary_line("Accesses:", metrics.accesses));
    out.push('\n');
    out.push_str(&summary_line("Unique addresses (byte):", metrics.unique_bytes));
    out.push_str(&summary_line("Accesses (byte):", metrics.byte_accesses));
    out.push('\n');
    out.push_str(&multi_line(
        "Addresses with multi-threaded access:",
        metrics.multi_addresses,
        metrics.multi_address_ratio(),
    ));
    out.push_str(&multi_line(
        "Multi-threaded accesses:",
        metrics.multi_accesses,
        metrics.multi_access_ratio(),
    ));
    out.push('\n');
    out.push_str(&multi_line(
        "Addresses with multi-threaded access (byte):",
        metrics.multi_bytes,
        metrics.multi_byte_ratio(),
    ));
    out.push_str(&multi_line(
        "Multi-threaded accesses (byte):",
        metrics.multi_byte_accesses,
        metrics.multi_byte_access_ratio(),
    ));

    out
}

fn summary_line(label: &str, value: impl Display) -> String {
    format!("{:<width$}{}\n", label, value, width = SUMMARY_LABEL_WIDTH)
}

fn multi_line(label: &str, count: u64, ratio: Ratio) -> String {
    format!(
        "{:<label_width$}{:<count_width$} ({} of total)\n",
        label,
        count,
        ratio,
        label_width = MULTI_LABEL_WIDTH,
        count_width = COUNT_FIELD_WIDTH
    )
}
