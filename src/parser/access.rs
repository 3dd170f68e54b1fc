//! Access event definitions.
//!
//! One `AccessEvent` is produced per access-record line and lives only
//! while that line is being processed.

/// A single logged memory operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessEvent {
    /// Operation tag as written by the tracer (e.g. "read4", "W")
    pub operation: String,

    /// Starting address of the access
    pub address: u64,

    /// Number of bytes covered, at least 1
    pub size: u64,

    /// Opaque identifier of the issuing thread
    pub thread: String,

    /// Origin location of the access
    pub source: String,
}

impl AccessEvent {
    /// Bytes `[address, address + size)` touched by this access
    ///
    /// Inclusive on the last byte so an access ending at `u64::MAX` is
    /// representable. The parser guarantees `size >= 1` and no overflow.
    pub fn byte_range(&self) -> std::ops::RangeInclusive<u64> {
        self.address..=self.address + (self.size - 1)
    }

    /// Classify the operation tag as a read or a write
    pub fn kind(&self) -> AccessKind {
        AccessKind::from_operation(&self.operation)
    }
}

/// Read/write classification of an operation tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessKind {
    Read,
    Write,
}

impl AccessKind {
    /// Tags mentioning "read" (any case, or the bare `R` shorthand) are reads,
    /// everything else counts as a write.
    pub fn from_operation(operation: &str) -> Self {
        if operation.eq_ignore_ascii_case("r") || operation.to_ascii_lowercase().contains("read") {
            Self::Read
        } else {
            Self::Write
        }
    }
}
