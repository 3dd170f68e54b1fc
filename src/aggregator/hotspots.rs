//! Read/write tallies per address and per source location.
//!
//! Hotspots are the addresses and source lines accessed most often. They are
//! ranked separately by read count and by write count.

use super::thread_set::{ThreadId, ThreadSet};
use crate::parser::{AccessEvent, AccessKind};
use fnv::FnvHashMap;
use std::collections::HashMap;
use std::hash::Hash;

/// Counts for one address or source location
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HotspotStats {
    pub reads: u64,
    pub writes: u64,
    pub threads: ThreadSet,
}

impl HotspotStats {
    fn add(&mut self, kind: AccessKind, thread: ThreadId) {
        match kind {
            AccessKind::Read => self.reads += 1,
            AccessKind::Write => self.writes += 1,
        }
        self.threads.insert(thread);
    }

    /// Count for the given access kind
    pub fn count(&self, kind: AccessKind) -> u64 {
        match kind {
            AccessKind::Read => self.reads,
            AccessKind::Write => self.writes,
        }
    }
}

/// One ranked row of a hotspot listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotspotRow<K> {
    pub key: K,
    pub reads: u64,
    pub writes: u64,
    pub threads: usize,
}

/// Per-address and per-source tallies for one trace
#[derive(Debug, Default)]
pub struct HotspotTally {
    addresses: FnvHashMap<u64, HotspotStats>,
    sources: HashMap<String, HotspotStats>,
}

impl HotspotTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Account one access; `thread` is the id assigned by the tracker
    pub fn record(&mut self, event: &AccessEvent, thread: ThreadId) {
        let kind = event.kind();

        self.addresses
            .entry(event.address)
            .or_default()
            .add(kind, thread);

        match self.sources.get_mut(event.source.as_str()) {
            Some(stats) => stats.add(kind, thread),
            None => {
                let mut stats = HotspotStats::default();
                stats.add(kind, thread);
                self.sources.insert(event.source.clone(), stats);
            }
        }
    }

    pub fn address_count(&self) -> usize {
        self.addresses.len()
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Addresses ranked by `kind` count, highest first
    pub fn ranked_addresses(&self, kind: AccessKind) -> Vec<HotspotRow<u64>> {
        rank(&self.addresses, kind)
    }

    /// Source locations ranked by `kind` count, highest first
    pub fn ranked_sources(&self, kind: AccessKind) -> Vec<HotspotRow<String>> {
        rank(&self.sources, kind)
    }
}

/// Sort by count descending, then key ascending so listings are stable
/// across runs regardless of hash order.
fn rank<K, S>(map: &HashMap<K, HotspotStats, S>, kind: AccessKind) -> Vec<HotspotRow<K>>
where
    K: Ord + Clone + Hash,
{
    let mut entries: Vec<(&K, &HotspotStats)> = map.iter().collect();
    entries.sort_by(|a, b| {
        b.1.count(kind)
            .cmp(&a.1.count(kind))
            .then_with(|| a.0.cmp(b.0))
    });

    entries
        .into_iter()
        .map(|(key, stats)| HotspotRow {
            key: key.clone(),
            reads: stats.reads,
            writes: stats.writes,
            threads: stats.threads.len(),
        })
        .collect()
}
