//! Trace parsing.
//!
//! This module handles:
//! - Recognizing access-record lines
//! - Parsing them into `AccessEvent`s
//! - Streaming events out of a trace file

pub mod access;
pub mod trace_log;

// Re-export main types
pub use access::{AccessEvent, AccessKind};
pub use trace_log::{is_access_record, parse_access_line, LineStats, TraceReader};
