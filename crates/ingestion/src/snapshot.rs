//! Immutable in-memory dataset shared across request handlers.

use crate::loader::LoadStats;
use std::sync::Arc;

/// Read-only set of records loaded once at startup.
///
/// Cloning is cheap; every clone points at the same records.
#[derive(Debug)]
pub struct Snapshot<T> {
    records: Arc<[T]>,
    stats: LoadStats,
}

impl<T> Clone for Snapshot<T> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
            stats: self.stats,
        }
    }
}

impl<T> Snapshot<T> {
    /// Create a snapshot from loaded records.
    pub fn new(records: Vec<T>, stats: LoadStats) -> Self {
        Self {
            records: records.into(),
            stats,
        }
    }

    /// Snapshot with no records.
    pub fn empty() -> Self {
        Self::new(Vec::new(), LoadStats::default())
    }

    /// Iterate records in load order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }

    /// Number of records.
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the snapshot holds no records.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Statistics from the load that produced this snapshot.
    pub fn stats(&self) -> LoadStats {
        self.stats
    }
}

impl<T> From<Vec<T>> for Snapshot<T> {
    fn from(records: Vec<T>) -> Self {
        let n = records.len() as u64;
        Self::new(
            records,
            LoadStats {
                rows_read: n,
                rows_loaded: n,
                rows_skipped: 0,
            },
        )
    }
}
