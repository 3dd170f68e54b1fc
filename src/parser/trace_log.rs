//! Line parser for race-detector access traces.
//!
//! Access records look like:
//!
//! ```text
//!  > sig write4 0x7b0400000010 4 2 foo.c:42
//! ```
//!
//! Only lines starting with the `" > "` marker are records. Everything else
//! (banners, blank separators, reports) is ignored. Malformed records are
//! skipped with a warning and never abort the run.

use super::access::AccessEvent;
use crate::utils::config::{ADDRESS_PREFIXES, RECORD_FIELDS, RECORD_MARKER};
use crate::utils::error::{AnalyzeError, ParseError};
use log::{debug, warn};
use std::io::BufRead;

/// Check whether a line carries an access record
pub fn is_access_record(line: &str) -> bool {
    line.starts_with(RECORD_MARKER)
}

/// Parse one access-record line into an `AccessEvent`
///
/// **Public** - main entry point for line parsing
///
/// # Errors
/// * `ParseError::NotARecord` - line lacks the record marker
/// * `ParseError::FieldCount` - wrong number of tokens
/// * `ParseError::InvalidAddress` / `ParseError::InvalidSize` - non-numeric fields
/// * `ParseError::AddressOverflow` - last byte lies past `u64::MAX`
pub fn parse_access_line(line: &str) -> Result<AccessEvent, ParseError> {
    let body = line
        .strip_prefix(RECORD_MARKER)
        .ok_or(ParseError::NotARecord)?;

    let tokens: Vec<&str> = body.split_whitespace().collect();

    // Six tokens carry an explicit signature. Five tokens is the compact
    // layout where the marker itself is the signature.
    let (operation, address, size, thread, source) = match tokens.as_slice() {
        [_, operation, address, size, thread, source]
        | [operation, address, size, thread, source] => {
            (*operation, *address, *size, *thread, *source)
        }
        other => {
            return Err(ParseError::FieldCount {
                expected: RECORD_FIELDS,
                found: other.len(),
            })
        }
    };

    let address = parse_address(address)?;
    let size = parse_size(size)?;

    // Last byte must be addressable; `size` is at least 1 here
    if address.checked_add(size - 1).is_none() {
        return Err(ParseError::AddressOverflow { address, size });
    }

    Ok(AccessEvent {
        operation: operation.to_string(),
        address,
        size,
        thread: thread.to_string(),
        source: source.to_string(),
    })
}

/// Parse a `0x`-prefixed hexadecimal address
pub fn parse_address(token: &str) -> Result<u64, ParseError> {
    let digits = ADDRESS_PREFIXES
        .iter()
        .find_map(|prefix| token.strip_prefix(prefix))
        .ok_or_else(|| ParseError::InvalidAddress(token.to_string()))?;

    u64::from_str_radix(digits, 16).map_err(|_| ParseError::InvalidAddress(token.to_string()))
}

/// Parse a decimal access size; zero is rejected
pub fn parse_size(token: &str) -> Result<u64, ParseError> {
    match token.parse::<u64>() {
        Ok(size) if size > 0 => Ok(size),
        _ => Err(ParseError::InvalidSize(token.to_string())),
    }
}

/// Line accounting for one pass over a trace
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineStats {
    /// Lines read, records or not
    pub lines: u64,

    /// Valid access records yielded
    pub records: u64,

    /// Record lines that failed to parse
    pub malformed: u64,
}

/// Streaming reader yielding access events from a trace
///
/// Non-record lines are ignored, malformed records are logged and skipped.
/// Only I/O failures surface as errors.
pub struct TraceReader<R> {
    reader: R,
    buffer: Vec<u8>,
    stats: LineStats,
}

impl<R: BufRead> TraceReader<R> {
    /// Wrap a buffered reader
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: Vec::new(),
            stats: LineStats::default(),
        }
    }

    /// Line accounting so far
    pub fn stats(&self) -> LineStats {
        self.stats
    }

    fn next_event(&mut self) -> Result<Option<AccessEvent>, AnalyzeError> {
        loop {
            self.buffer.clear();
            if self.reader.read_until(b'\n', &mut self.buffer)? == 0 {
                debug!(
                    "End of trace: {} lines, {} records, {} malformed",
                    self.stats.lines, self.stats.records, self.stats.malformed
                );
                return Ok(None);
            }
            self.stats.lines += 1;

            let line = String::from_utf8_lossy(&self.buffer);
            if !is_access_record(&line) {
                continue;
            }

            match parse_access_line(&line) {
                Ok(event) => {
                    self.stats.records += 1;
                    return Ok(Some(event));
                }
                Err(e) => {
                    self.stats.malformed += 1;
                    warn!("Skipping malformed record at line {}: {}", self.stats.lines, e);
                }
            }
        }
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<AccessEvent, AnalyzeError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_event().transpose()
    }
}
