//! Configuration and constants for the analyzer.

/// Prefix that marks a line as an access record
pub const RECORD_MARKER: &str = " > ";

/// Tokens after the marker: signature, operation, address, size, thread, source
pub const RECORD_FIELDS: usize = 6;

/// Prefix stripped from the address token before hex parsing
pub const ADDRESS_PREFIXES: &[&str] = &["0x", "0X"];

// Report layout. Labels are padded so values line up in one column,
// multi-threaded counts are left-justified in a fixed-width field.
pub const SUMMARY_LABEL_WIDTH: usize = 27;
pub const MULTI_LABEL_WIDTH: usize = 47;
pub const COUNT_FIELD_WIDTH: usize = 10;

/// Rendered in place of a ratio whose denominator is zero
pub const NOT_APPLICABLE: &str = "N/A";

// Hotspot listing file names
pub const ADDRESS_READ_SORT_FILE: &str = "address-read-sort.txt";
pub const ADDRESS_WRITE_SORT_FILE: &str = "address-write-sort.txt";
pub const SOURCE_READ_SORT_FILE: &str = "source-read-sort.txt";
pub const SOURCE_WRITE_SORT_FILE: &str = "source-write-sort.txt";
