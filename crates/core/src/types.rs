//! Core data types for the revenue analysis system.

use serde::{Deserialize, Serialize};

/// Customer identifier. Opaque: "011" and "11" are different customers.
pub type CustomerId = String;

/// Sale date in fixed-width `yyyymmdd` form, compared as a raw string.
pub type SaleDate = String;

/// Order amount in whole currency units.
pub type Amount = i64;

/// Check whether `date` falls inside `[start, end]`.
///
/// Comparison is byte-wise on the raw strings, so malformed dates are
/// ordered rather than rejected. An empty bound matches nothing.
#[inline]
pub fn date_in_range(date: &str, start: &str, end: &str) -> bool {
    if start.is_empty() || end.is_empty() {
        return false;
    }
    start <= date && date <= end
}

/// A customer record from the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Customer id.
    #[serde(alias = "custid")]
    pub id: CustomerId,
    /// Display name.
    #[serde(alias = "custname")]
    pub name: String,
    /// City the customer is located in.
    pub city: String,
}

/// A single order from the sales ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    /// Order id.
    #[serde(alias = "ordid")]
    pub order_id: String,
    /// Customer the order belongs to. Not validated against the directory.
    #[serde(alias = "custid")]
    pub customer_id: CustomerId,
    /// Order date (`yyyymmdd`).
    #[serde(alias = "orddate")]
    pub date: SaleDate,
    /// Order amount.
    #[serde(alias = "ordamount")]
    pub amount: Amount,
}

impl Sale {
    /// Whether the sale date lies inside the inclusive range.
    #[inline]
    pub fn within(&self, start: &str, end: &str) -> bool {
        date_in_range(&self.date, start, end)
    }
}

/// Revenue summary for one customer over a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRevenue {
    /// Customer id, echoed verbatim even when the customer is unknown.
    pub id: CustomerId,
    /// Customer name, empty when unknown.
    pub name: String,
    /// Customer city, empty when unknown.
    pub city: String,
    /// Sum of matched sale amounts.
    pub revenue: Amount,
    /// Number of matched sales.
    pub sales_count: u64,
}

impl CustomerRevenue {
    /// Zero-valued report for a customer id the directory does not know.
    pub fn unknown(id: impl Into<CustomerId>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            city: String::new(),
            revenue: 0,
            sales_count: 0,
        }
    }

    /// Zero-valued report for a known customer.
    pub fn empty_for(customer: &Customer) -> Self {
        Self {
            id: customer.id.clone(),
            name: customer.name.clone(),
            city: customer.city.clone(),
            revenue: 0,
            sales_count: 0,
        }
    }
}

/// Revenue summary for every customer of a city over a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityRevenue {
    /// City as requested by the caller.
    pub city: String,
    /// Sum of the per-customer revenues.
    pub total_revenue: Amount,
    /// Number of customers in the city.
    pub customer_count: u64,
    /// Per-customer reports in directory order.
    pub customers: Vec<CustomerRevenue>,
}

impl CityRevenue {
    /// Report for a city with no customers.
    pub fn empty(city: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            total_revenue: 0,
            customer_count: 0,
            customers: Vec::new(),
        }
    }
}
