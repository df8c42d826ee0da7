//! Sales ledger: inclusive date-range queries over orders.

use revenue_core::Sale;
use revenue_ingestion::Snapshot;

/// Read-only sales ledger backed by a startup snapshot.
#[derive(Debug, Clone)]
pub struct Ledger {
    sales: Snapshot<Sale>,
}

impl Ledger {
    /// Create a ledger over loaded sales.
    pub fn new(sales: Snapshot<Sale>) -> Self {
        Self { sales }
    }

    /// Sales with `start <= date <= end`, in load order.
    ///
    /// Dates compare as raw strings. A blank bound returns nothing rather
    /// than disabling the filter.
    pub fn query_by_date_range(&self, start: &str, end: &str) -> Vec<&Sale> {
        if start.is_empty() || end.is_empty() {
            return Vec::new();
        }
        self.sales
            .iter()
            .filter(|s| s.within(start, end))
            .collect()
    }

    /// Number of sales.
    pub fn len(&self) -> usize {
        self.sales.len()
    }

    /// Whether the ledger is empty (nothing loaded).
    pub fn is_empty(&self) -> bool {
        self.sales.is_empty()
    }
}

impl From<Vec<Sale>> for Ledger {
    fn from(sales: Vec<Sale>) -> Self {
        Self::new(sales.into())
    }
}
