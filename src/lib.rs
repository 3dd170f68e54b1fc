//! Trace Contention
//!
//! Memory-access contention statistics for race-detector traces.
//!
//! Reads a captured access trace once, tracks which threads touched every
//! address and every byte, and reports how much of the traced program's
//! memory traffic was shared between threads. Used to compare sanitizer
//! builds by their exposure to concurrent sharing.
//!
//! ## Getting Started
//!
//! ```bash
//! trace-analyze trace.log
//! trace-analyze --hotspots out/ --top 50 trace.log
//! ```

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod utils;
