//! Aggregation of access events into contention statistics.
//!
//! This module transforms parsed access events into:
//! - Per-address and per-byte thread sets (tracker)
//! - Derived counts and ratios (metrics)
//! - Optional read/write hotspot rankings (hotspots)

pub mod hotspots;
pub mod metrics;
pub mod thread_set;
pub mod tracker;

// Re-export main types
pub use hotspots::{HotspotRow, HotspotStats, HotspotTally};
pub use metrics::{ContentionMetrics, Ratio};
pub use thread_set::{ThreadId, ThreadInterner, ThreadSet};
pub use tracker::{AccessCounters, AccessTracker, CountingMode};
