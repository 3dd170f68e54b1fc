//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors for a single malformed access record.
///
/// These are local: the offending line is skipped and the run continues.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Not an access record")]
    NotARecord,

    #[error("Expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid access size: {0}")]
    InvalidSize(String),

    #[error("Access range runs past the address space: {address:#x} + {size}")]
    AddressOverflow { address: u64, size: u64 },
}

/// Errors that abort an analysis run
#[derive(Error, Debug)]
pub enum AnalyzeError {
    #[error("Trace file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to read trace: {0}")]
    ReadFailed(#[from] std::io::Error),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
