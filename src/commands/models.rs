use crate::aggregator::CountingMode;
use std::path::PathBuf;

/// Arguments for the analyze command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AnalyzeArgs {
    /// Path to the trace file
    pub trace_path: PathBuf,

    /// How the access that first shares a location is counted
    pub counting_mode: CountingMode,

    /// Directory for hotspot listings (optional)
    pub hotspots_dir: Option<PathBuf>,

    /// Number of rows kept in each hotspot listing (None = all)
    pub top: Option<usize>,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            trace_path: PathBuf::new(),
            counting_mode: CountingMode::Compatible,
            hotspots_dir: None,
            top: None,
        }
    }
}
