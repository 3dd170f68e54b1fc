//! Thread identity and per-location thread sets.
//!
//! Thread identifiers in a trace are opaque strings. They are interned once
//! into dense `ThreadId` handles so that the per-address and per-byte sets
//! only ever hold small integers.

use std::collections::HashMap;

/// Interned handle for a traced thread
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ThreadId(u32);

/// Maps opaque thread names to `ThreadId`s in order of first appearance
#[derive(Debug, Default)]
pub struct ThreadInterner {
    ids: HashMap<String, ThreadId>,
}

impl ThreadInterner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the handle for `name`, assigning a new one on first sight
    pub fn intern(&mut self, name: &str) -> ThreadId {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }

        let id = ThreadId(self.ids.len() as u32);
        self.ids.insert(name.to_string(), id);
        id
    }

    /// Number of distinct threads seen
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Set of threads that touched one location
///
/// Most locations are only ever touched by one thread, so that case is kept
/// inline. The set only grows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ThreadSet {
    #[default]
    Empty,
    Single(ThreadId),
    /// Sorted, deduplicated, at least two entries
    Shared(Vec<ThreadId>),
}

impl ThreadSet {
    pub fn len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Single(_) => 1,
            Self::Shared(ids) => ids.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// True once a second distinct thread has been inserted
    pub fn is_shared(&self) -> bool {
        matches!(self, Self::Shared(_))
    }

    pub fn contains(&self, thread: ThreadId) -> bool {
        match self {
            Self::Empty => false,
            Self::Single(id) => *id == thread,
            Self::Shared(ids) => ids.binary_search(&thread).is_ok(),
        }
    }

    /// Insert a thread, returning true if it was not already present
    pub fn insert(&mut self, thread: ThreadId) -> bool {
        match self {
            Self::Empty => {
                *self = Self::Single(thread);
                true
            }
            Self::Single(id) if *id == thread => false,
            Self::Single(id) => {
                let mut ids = vec![*id, thread];
                ids.sort_unstable();
                *self = Self::Shared(ids);
                true
            }
            Self::Shared(ids) => match ids.binary_search(&thread) {
                Ok(_) => false,
                Err(pos) => {
                    ids.insert(pos, thread);
                    true
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interner_assigns_dense_ids() {
        let mut interner = ThreadInterner::new();
        let a = interner.intern("t1");
        let b = interner.intern("t2");

        assert_eq!(interner.intern("t1"), a);
        assert_ne!(a, b);
        assert_eq!(interner.len(), 2);
        assert_eq!(interner.intern("t3"), ThreadId(2));
    }

    #[test]
    fn test_thread_set_grows_monotonically() {
        let mut set = ThreadSet::default();
        assert!(set.is_empty());

        assert!(set.insert(ThreadId(3)));
        assert!(!set.insert(ThreadId(3)));
        assert_eq!(set, ThreadSet::Single(ThreadId(3)));

        assert!(set.insert(ThreadId(1)));
        assert!(set.insert(ThreadId(2)));
        assert!(!set.insert(ThreadId(1)));

        assert!(set.is_shared());
        assert_eq!(set.len(), 3);
        assert!(set.contains(ThreadId(2)));
        assert!(!set.contains(ThreadId(7)));
        assert_eq!(
            set,
            ThreadSet::Shared(vec![ThreadId(1), ThreadId(2), ThreadId(3)])
        );
    }
}
