//! Hotspot listing writer.
//!
//! Writes four ranked listings into one directory, one row per line:
//! `<key> <reads> <writes> <threads>`.

use crate::aggregator::{HotspotRow, HotspotTally};
use crate::parser::AccessKind;
use crate::utils::config::{
    ADDRESS_READ_SORT_FILE, ADDRESS_WRITE_SORT_FILE, SOURCE_READ_SORT_FILE,
    SOURCE_WRITE_SORT_FILE,
};
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fmt::Display;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Write all hotspot listings into `dir`
///
/// **Public** - main entry point for hotspot output
///
/// # Arguments
/// * `dir` - Output directory, created if missing
/// * `tally` - Tallies collected during the pass
/// * `top` - Keep only the first `top` rows of each listing
///
/// # Returns
/// Paths of the written files
///
/// # Errors
/// * `OutputError::InvalidPath` - `dir` exists but is not a directory
/// * `OutputError::WriteFailed` - I/O error during write
pub fn write_hotspots(
    dir: impl AsRef<Path>,
    tally: &HotspotTally,
    top: Option<usize>,
) -> Result<Vec<PathBuf>, OutputError> {
    let dir = dir.as_ref();

    info!("Writing hotspot listings to: {}", dir.display());

    super::validate_dir(dir)?;

    if !dir.exists() {
        debug!("Creating output directory: {}", dir.display());
        std::fs::create_dir_all(dir)?;
    }

    let limit = top.unwrap_or(usize::MAX);
    let mut written = Vec::with_capacity(4);

    for (file_name, kind) in [
        (ADDRESS_READ_SORT_FILE, AccessKind::Read),
        (ADDRESS_WRITE_SORT_FILE, AccessKind::Write),
    ] {
        let path = dir.join(file_name);
        let rows = tally.ranked_addresses(kind);
        write_rows(&path, rows.iter().take(limit), |address| {
            format!("{:#x}", address)
        })?;
        written.push(path);
    }

    for (file_name, kind) in [
        (SOURCE_READ_SORT_FILE, AccessKind::Read),
        (SOURCE_WRITE_SORT_FILE, AccessKind::Write),
    ] {
        let path = dir.join(file_name);
        let rows = tally.ranked_sources(kind);
        write_rows(&path, rows.iter().take(limit), |source| source.clone())?;
        written.push(path);
    }

    Ok(written)
}

fn write_rows<'a, K, D>(
    path: &Path,
    rows: impl Iterator<Item = &'a HotspotRow<K>>,
    format_key: impl Fn(&K) -> D,
) -> Result<(), OutputError>
where
    K: 'a,
    D: Display,
{
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    let mut count = 0usize;

    for row in rows {
        writeln!(
            writer,
            "{} {} {} {}",
            format_key(&row.key),
            row.reads,
            row.writes,
            row.threads
        )?;
        count += 1;
    }

    writer.flush()?;
    debug!("Wrote {} rows to {}", count, path.display());

    Ok(())
}
