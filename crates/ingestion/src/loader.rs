//! CSV loading with per-row error tolerance.
//!
//! A file is read once at startup. Rows that fail to deserialize are
//! skipped and counted; only I/O failures abort a load.

use crate::snapshot::Snapshot;
use revenue_core::{Error, Result};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

/// Statistics about a single CSV load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Data rows seen (header excluded).
    pub rows_read: u64,
    /// Rows turned into records.
    pub rows_loaded: u64,
    /// Rows dropped because they did not parse.
    pub rows_skipped: u64,
}

impl LoadStats {
    /// Fraction of rows that were skipped.
    pub fn skipped_frac(&self) -> f64 {
        if self.rows_read > 0 {
            self.rows_skipped as f64 / self.rows_read as f64
        } else {
            0.0
        }
    }
}

/// Deserialize every data row of a headed CSV stream.
pub fn read_records<T, R>(reader: R) -> Result<(Vec<T>, LoadStats)>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::None)
        .from_reader(reader);

    let mut records = Vec::new();
    let mut stats = LoadStats::default();

    for row in rdr.deserialize::<T>() {
        stats.rows_read += 1;
        match row {
            Ok(record) => {
                records.push(record);
                stats.rows_loaded += 1;
            }
            Err(e) if e.is_io_error() => return Err(Error::Csv(e)),
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or_default();
                warn!(line, error = %e, "skipping malformed row");
                stats.rows_skipped += 1;
            }
        }
    }

    Ok((records, stats))
}

/// Load a CSV file into a snapshot.
pub fn load_csv<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<Snapshot<T>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let (records, stats) = read_records(file)?;

    info!(
        path = %path.display(),
        loaded = stats.rows_loaded,
        skipped = stats.rows_skipped,
        "loaded records"
    );
    if stats.rows_skipped > 0 {
        warn!(
            path = %path.display(),
            skipped_frac = stats.skipped_frac(),
            "some rows could not be parsed"
        );
    }

    Ok(Snapshot::new(records, stats))
}

/// Load a CSV file, falling back to an empty snapshot if it cannot be read.
///
/// The process keeps running with no data rather than failing startup.
pub fn load_or_empty<T: DeserializeOwned>(path: impl AsRef<Path>) -> Snapshot<T> {
    let path = path.as_ref();
    match load_csv(path) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "data file unavailable, serving empty dataset");
            Snapshot::empty()
        }
    }
}
