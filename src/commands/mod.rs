//! CLI command implementations.
//!
//! Commands orchestrate the library components to perform user tasks.

pub mod analyze;
pub mod models;

// Re-export main command functions
pub use analyze::{analyze_file, analyze_reader, execute_analyze, validate_args, Analysis};
pub use models::AnalyzeArgs;
