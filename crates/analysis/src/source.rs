//! Data-source seam between the aggregator and the lookup services.
//!
//! Sources never fail: an unreachable or erroring dependency answers
//! `None` or an empty list, so the aggregator always produces a report.

use revenue_core::{Customer, Sale};
use revenue_lookup::{Directory, Ledger};
use std::future::Future;

/// Where customer records come from.
pub trait CustomerSource {
    /// Customer with exactly this id, if any.
    fn lookup_by_id(&self, id: &str) -> impl Future<Output = Option<Customer>> + Send;

    /// Customers whose city matches ignoring case, in directory order.
    fn lookup_by_city(&self, city: &str) -> impl Future<Output = Vec<Customer>> + Send;
}

/// Where sale records come from.
pub trait SalesSource {
    /// Sales dated inside `[start, end]`; empty if either bound is blank.
    fn query_by_date_range(&self, start: &str, end: &str)
        -> impl Future<Output = Vec<Sale>> + Send;
}

impl CustomerSource for Directory {
    async fn lookup_by_id(&self, id: &str) -> Option<Customer> {
        Directory::lookup_by_id(self, id).cloned()
    }

    async fn lookup_by_city(&self, city: &str) -> Vec<Customer> {
        Directory::lookup_by_city(self, city)
            .into_iter()
            .cloned()
            .collect()
    }
}

impl SalesSource for Ledger {
    async fn query_by_date_range(&self, start: &str, end: &str) -> Vec<Sale> {
        Ledger::query_by_date_range(self, start, end)
            .into_iter()
            .cloned()
            .collect()
    }
}
