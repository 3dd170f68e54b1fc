//! Derive contention metrics from a finished tracking pass.
//!
//! Two different notions of "multi-threaded" are reported side by side:
//! - locations whose final thread set has more than one member
//! - the running transition counters kept by the tracker

use super::tracker::AccessTracker;
use crate::utils::config::NOT_APPLICABLE;
use log::debug;
use std::fmt;

/// A percentage that may be undefined
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ratio {
    /// Value in percent (0.0 - 100.0)
    Percent(f64),

    /// Denominator was zero
    NotApplicable,
}

impl Ratio {
    /// `100 * part / whole`, or `NotApplicable` for an empty whole
    pub fn of(part: u64, whole: u64) -> Self {
        if whole == 0 {
            Self::NotApplicable
        } else {
            Self::Percent(100.0 * part as f64 / whole as f64)
        }
    }
}

impl fmt::Display for Ratio {
    /// Two decimals with a percent sign, or `N/A`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Percent(value) => write!(f, "{:.2}%", value),
            Self::NotApplicable => f.write_str(NOT_APPLICABLE),
        }
    }
}

/// Final contention statistics for one trace
///
/// **Public** - consumed by the report renderer
#[derive(Debug, Clone, PartialEq)]
pub struct ContentionMetrics {
    /// Distinct operation tags, sorted
    pub operations: Vec<String>,

    /// Distinct traced threads
    pub threads: usize,

    /// Distinct start addresses
    pub unique_addresses: u64,

    /// Total accesses
    pub accesses: u64,

    /// Distinct bytes touched
    pub unique_bytes: u64,

    /// Total byte accesses
    pub byte_accesses: u64,

    /// Start addresses touched by more than one thread
    pub multi_addresses: u64,

    /// Accesses counted as multi-threaded by the tracker
    pub multi_accesses: u64,

    /// Bytes touched by more than one thread
    pub multi_bytes: u64,

    /// Byte accesses counted as multi-threaded by the tracker
    pub multi_byte_accesses: u64,
}

impl ContentionMetrics {
    /// Collect metrics from the tracker's final state
    pub fn from_tracker(tracker: &AccessTracker) -> Self {
        let counters = tracker.counters();

        let metrics = Self {
            operations: tracker.operations().map(str::to_string).collect(),
            threads: tracker.threads().len(),
            unique_addresses: tracker.unique_addresses() as u64,
            accesses: counters.accesses,
            unique_bytes: tracker.unique_bytes() as u64,
            byte_accesses: counters.byte_accesses,
            multi_addresses: tracker.shared_addresses() as u64,
            multi_accesses: counters.multi_accesses,
            multi_bytes: tracker.shared_bytes() as u64,
            multi_byte_accesses: counters.multi_byte_accesses,
        };

        debug!("Contention metrics: {}", metrics.summary());
        metrics
    }

    pub fn multi_address_ratio(&self) -> Ratio {
        Ratio::of(self.multi_addresses, self.unique_addresses)
    }

    pub fn multi_access_ratio(&self) -> Ratio {
        Ratio::of(self.multi_accesses, self.accesses)
    }

    pub fn multi_byte_ratio(&self) -> Ratio {
        Ratio::of(self.multi_bytes, self.unique_bytes)
    }

    pub fn multi_byte_access_ratio(&self) -> Ratio {
        Ratio::of(self.multi_byte_accesses, self.byte_accesses)
    }

    /// One-line summary for logging
    pub fn summary(&self) -> String {
        format!(
            "Accesses: {} | Addresses: {} ({} shared) | Bytes: {} ({} shared) | Threads: {}",
            self.accesses,
            self.unique_addresses,
            self.multi_addresses,
            self.unique_bytes,
            self.multi_bytes,
            self.threads
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::tracker::CountingMode;
    use crate::parser::AccessEvent;

    fn access(operation: &str, address: u64, size: u64, thread: &str) -> AccessEvent {
        AccessEvent {
            operation: operation.to_string(),
            address,
            size,
            thread: thread.to_string(),
            source: "src".to_string(),
        }
    }

    #[test]
    fn test_ratio_of() {
        assert_eq!(Ratio::of(1, 4), Ratio::Percent(25.0));
        assert_eq!(Ratio::of(0, 0), Ratio::NotApplicable);
        assert_eq!(Ratio::of(3, 0), Ratio::NotApplicable);
    }

    #[test]
    fn test_ratio_display() {
        assert_eq!(Ratio::Percent(100.0).to_string(), "100.00%");
        assert_eq!(Ratio::of(1, 3).to_string(), "33.33%");
        assert_eq!(Ratio::of(2, 3).to_string(), "66.67%");
        assert_eq!(Ratio::NotApplicable.to_string(), "N/A");
    }

    #[test]
    fn test_metrics_from_two_thread_trace() {
        let mut tracker = AccessTracker::new(CountingMode::Compatible);
        tracker.record(&access("W", 0x10, 4, "t1"));
        tracker.record(&access("R", 0x10, 4, "t2"));

        let metrics = ContentionMetrics::from_tracker(&tracker);

        assert_eq!(metrics.operations, vec!["R", "W"]);
        assert_eq!(metrics.threads, 2);
        assert_eq!(metrics.unique_addresses, 1);
        assert_eq!(metrics.accesses, 2);
        assert_eq!(metrics.unique_bytes, 4);
        assert_eq!(metrics.byte_accesses, 8);
        assert_eq!(metrics.multi_addresses, 1);
        assert_eq!(metrics.multi_bytes, 4);
        assert_eq!(metrics.multi_address_ratio(), Ratio::Percent(100.0));
        assert_eq!(metrics.multi_byte_ratio(), Ratio::Percent(100.0));
        assert_eq!(metrics.multi_access_ratio(), Ratio::Percent(100.0));
        assert_eq!(metrics.multi_byte_access_ratio(), Ratio::Percent(100.0));
    }

    #[test]
    fn test_metrics_empty_tracker() {
        let tracker = AccessTracker::new(CountingMode::Compatible);
        let metrics = ContentionMetrics::from_tracker(&tracker);

        assert!(metrics.operations.is_empty());
        assert_eq!(metrics.multi_address_ratio(), Ratio::NotApplicable);
        assert_eq!(metrics.multi_access_ratio(), Ratio::NotApplicable);
        assert_eq!(metrics.multi_byte_ratio(), Ratio::NotApplicable);
        assert_eq!(metrics.multi_byte_access_ratio(), Ratio::NotApplicable);
    }
}
