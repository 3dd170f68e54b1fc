//! Output writers for analysis results.
//!
//! This module handles:
//! - The fixed-format text report
//! - Hotspot listings written to disk

pub mod hotspots;
pub mod report;

// Re-export main functions
pub use hotspots::write_hotspots;
pub use report::render_report;

use crate::utils::error::OutputError;
use std::path::Path;

/// Common path validation for output directories
pub fn validate_dir(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && !path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is not a directory: {}",
            path.display()
        )));
    }

    Ok(())
}
