//! Revenue aggregation: join customers to date-filtered sales and sum.
//!
//! The join helpers are pure functions over slices. [`RevenueAggregator`]
//! wires them to a [`CustomerSource`] and a [`SalesSource`].

use crate::source::{CustomerSource, SalesSource};
use revenue_core::{Amount, CityRevenue, Customer, CustomerRevenue, Sale};
use std::collections::HashMap;
use tracing::{debug, info};

/// Matched-sale totals for one customer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    /// Sum of amounts.
    pub revenue: Amount,
    /// Number of sales.
    pub sales_count: u64,
}

impl Tally {
    #[inline]
    fn add(&mut self, amount: Amount) {
        self.revenue = self.revenue.saturating_add(amount);
        self.sales_count += 1;
    }

    fn report_for(self, customer: &Customer) -> CustomerRevenue {
        CustomerRevenue {
            revenue: self.revenue,
            sales_count: self.sales_count,
            ..CustomerRevenue::empty_for(customer)
        }
    }
}

/// Totals for the sales belonging to `customer_id`.
pub fn tally_for<'a, I>(customer_id: &str, sales: I) -> Tally
where
    I: IntoIterator<Item = &'a Sale>,
{
    let mut tally = Tally::default();
    for sale in sales.into_iter().filter(|s| s.customer_id == customer_id) {
        tally.add(sale.amount);
    }
    tally
}

/// Group sales by customer id in a single pass.
pub fn tally_by_customer<'a, I>(sales: I) -> HashMap<&'a str, Tally>
where
    I: IntoIterator<Item = &'a Sale>,
{
    let mut groups: HashMap<&str, Tally> = HashMap::new();
    for sale in sales {
        groups.entry(sale.customer_id.as_str()).or_default().add(sale.amount);
    }
    groups
}

/// Report for one customer given its directory entry and the period's sales.
///
/// An unknown customer yields a zero report that echoes `customer_id`.
pub fn join_customer(customer_id: &str, customer: Option<&Customer>, sales: &[Sale]) -> CustomerRevenue {
    match customer {
        Some(customer) => tally_for(&customer.id, sales).report_for(customer),
        None => CustomerRevenue::unknown(customer_id),
    }
}

/// Report for every customer of a city given the period's sales.
///
/// Customers keep directory order; those without sales report zero.
/// Sales for customers outside `customers` are ignored.
pub fn join_city(city: &str, customers: &[Customer], sales: &[Sale]) -> CityRevenue {
    if customers.is_empty() {
        return CityRevenue::empty(city);
    }

    let groups = tally_by_customer(sales);
    let mut total_revenue: Amount = 0;
    let mut reports = Vec::with_capacity(customers.len());

    for customer in customers {
        let tally = groups.get(customer.id.as_str()).copied().unwrap_or_default();
        total_revenue = total_revenue.saturating_add(tally.revenue);
        reports.push(tally.report_for(customer));
    }

    CityRevenue {
        city: city.to_string(),
        total_revenue,
        customer_count: reports.len() as u64,
        customers: reports,
    }
}

/// Computes revenue reports from a customer source and a sales source.
#[derive(Debug, Clone)]
pub struct RevenueAggregator<C, S> {
    customers: C,
    sales: S,
}

impl<C, S> RevenueAggregator<C, S>
where
    C: CustomerSource,
    S: SalesSource,
{
    /// Create an aggregator over the given sources.
    pub fn new(customers: C, sales: S) -> Self {
        Self { customers, sales }
    }

    /// Revenue of one customer between `start` and `end` inclusive.
    pub async fn customer_revenue(&self, customer_id: &str, start: &str, end: &str) -> CustomerRevenue {
        info!(customer_id, start, end, "computing customer revenue");

        let Some(customer) = self.customers.lookup_by_id(customer_id).await else {
            debug!(customer_id, "unknown customer, skipping sales query");
            return CustomerRevenue::unknown(customer_id);
        };

        let sales = self.sales.query_by_date_range(start, end).await;
        let report = join_customer(customer_id, Some(&customer), &sales);

        debug!(
            customer_id,
            revenue = report.revenue,
            sales_count = report.sales_count,
            "customer revenue computed"
        );
        report
    }

    /// Revenue of every customer in `city` between `start` and `end` inclusive.
    ///
    /// The ledger is queried once for the whole city.
    pub async fn city_revenue(&self, city: &str, start: &str, end: &str) -> CityRevenue {
        info!(city, start, end, "computing city revenue");

        let customers = self.customers.lookup_by_city(city).await;
        if customers.is_empty() {
            debug!(city, "no customers in city, skipping sales query");
            return CityRevenue::empty(city);
        }

        let sales = self.sales.query_by_date_range(start, end).await;
        let report = join_city(city, &customers, &sales);

        debug!(
            city,
            total_revenue = report.total_revenue,
            customer_count = report.customer_count,
            "city revenue computed"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use revenue_lookup::{Directory, Ledger};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn make_customer(id: &str, name: &str, city: &str) -> Customer {
        Customer {
            id: id.to_string(),
            name: name.to_string(),
            city: city.to_string(),
        }
    }

    fn make_sale(order_id: &str, customer_id: &str, date: &str, amount: i64) -> Sale {
        Sale {
            order_id: order_id.to_string(),
            customer_id: customer_id.to_string(),
            date: date.to_string(),
            amount,
        }
    }

    fn sample_customers() -> Vec<Customer> {
        vec![
            make_customer("011", "Alpha", "Rome"),
            make_customer("012", "Beta", "Eindhoven"),
            make_customer("013", "Gamma", "Eindhoven"),
            make_customer("014", "Delta", "eindhoven"),
        ]
    }

    fn sample_sales() -> Vec<Sale> {
        vec![
            make_sale("1", "011", "20260105", 100),
            make_sale("2", "012", "20260110", 250),
            make_sale("3", "012", "20260120", 50),
            make_sale("4", "013", "20260301", 999),
            make_sale("5", "999", "20260115", 40),
            make_sale("6", "011", "20260131", 7),
        ]
    }

    fn sample_aggregator() -> RevenueAggregator<Directory, Ledger> {
        RevenueAggregator::new(Directory::from(sample_customers()), Ledger::from(sample_sales()))
    }

    /// Ledger wrapper that counts queries.
    struct CountingLedger {
        inner: Ledger,
        queries: AtomicUsize,
    }

    impl SalesSource for CountingLedger {
        async fn query_by_date_range(&self, start: &str, end: &str) -> Vec<Sale> {
            self.queries.fetch_add(1, Ordering::SeqCst);
            SalesSource::query_by_date_range(&self.inner, start, end).await
        }
    }

    fn counting_aggregator() -> RevenueAggregator<Directory, CountingLedger> {
        RevenueAggregator::new(
            Directory::from(sample_customers()),
            CountingLedger {
                inner: Ledger::from(sample_sales()),
                queries: AtomicUsize::new(0),
            },
        )
    }

    #[test]
    fn test_tally_for_filters_by_id() {
        let sales = sample_sales();
        let tally = tally_for("012", &sales);
        assert_eq!(tally, Tally { revenue: 300, sales_count: 2 });
        assert_eq!(tally_for("12", &sales), Tally::default());
    }

    #[test]
    fn test_tally_by_customer_groups_everything() {
        let sales = sample_sales();
        let groups = tally_by_customer(&sales);
        assert_eq!(groups.len(), 4);
        assert_eq!(groups["011"].revenue, 107);
        assert_eq!(groups["999"].sales_count, 1);
    }

    #[test]
    fn test_join_city_includes_zero_revenue_customers() {
        let customers = vec![
            make_customer("012", "Beta", "Eindhoven"),
            make_customer("014", "Delta", "Eindhoven"),
        ];
        let report = join_city("Eindhoven", &customers, &sample_sales());
        assert_eq!(report.customer_count, 2);
        assert_eq!(report.customers[1].id, "014");
        assert_eq!(report.customers[1].revenue, 0);
        assert_eq!(report.customers[1].sales_count, 0);
        assert_eq!(report.total_revenue, 250 + 50);
    }

    #[test]
    fn test_join_city_duplicate_ids_counted_per_entry() {
        let customers = vec![
            make_customer("012", "Beta", "Eindhoven"),
            make_customer("012", "Beta (dup)", "Eindhoven"),
        ];
        let report = join_city("Eindhoven", &customers, &sample_sales());
        assert_eq!(report.customer_count, 2);
        assert_eq!(report.total_revenue, 600);
    }

    #[tokio::test]
    async fn test_customer_revenue_in_january() {
        let aggregator = sample_aggregator();
        let report = aggregator.customer_revenue("011", "20260101", "20260131").await;
        assert_eq!(
            report,
            CustomerRevenue {
                id: "011".to_string(),
                name: "Alpha".to_string(),
                city: "Rome".to_string(),
                revenue: 107,
                sales_count: 2,
            }
        );
    }

    #[tokio::test]
    async fn test_customer_revenue_outside_range_is_zero() {
        let aggregator = sample_aggregator();
        let report = aggregator.customer_revenue("011", "20260201", "20260228").await;
        assert_eq!(report.name, "Alpha");
        assert_eq!(report.revenue, 0);
        assert_eq!(report.sales_count, 0);
    }

    #[tokio::test]
    async fn test_unknown_customer_skips_ledger() {
        let aggregator = counting_aggregator();
        let report = aggregator.customer_revenue("404", "20260101", "20261231").await;
        assert_eq!(report, CustomerRevenue::unknown("404"));
        assert_eq!(aggregator.sales.queries.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_city_revenue_queries_ledger_once() {
        let aggregator = counting_aggregator();
        let report = aggregator.city_revenue("EINDHOVEN", "20260101", "20261231").await;

        assert_eq!(aggregator.sales.queries.load(Ordering::SeqCst), 1);
        assert_eq!(report.city, "EINDHOVEN");
        assert_eq!(report.customer_count, 3);
        let ids: Vec<&str> = report.customers.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["012", "013", "014"]);
        assert_eq!(report.total_revenue, 250 + 50 + 999);
    }

    #[tokio::test]
    async fn test_unknown_city_skips_ledger() {
        let aggregator = counting_aggregator();
        let report = aggregator.city_revenue("Oslo", "20260101", "20261231").await;
        assert_eq!(report, CityRevenue::empty("Oslo"));
        assert_eq!(aggregator.sales.queries.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_city_match_is_case_insensitive() {
        let aggregator = sample_aggregator();
        let upper = aggregator.city_revenue("EINDHOVEN", "20260101", "20260131").await;
        let title = aggregator.city_revenue("Eindhoven", "20260101", "20260131").await;
        assert_eq!(upper.total_revenue, title.total_revenue);
        assert_eq!(upper.customers, title.customers);
    }

    #[tokio::test]
    async fn test_blank_dates_give_zero_revenue() {
        let aggregator = sample_aggregator();
        let report = aggregator.customer_revenue("012", "", "20261231").await;
        assert_eq!(report.revenue, 0);
        assert_eq!(report.name, "Beta");

        let report = aggregator.city_revenue("Eindhoven", "20260101", "").await;
        assert_eq!(report.total_revenue, 0);
        assert_eq!(report.customer_count, 3);
        assert!(report.customers.iter().all(|c| c.sales_count == 0));
    }

    #[tokio::test]
    async fn test_city_total_matches_sum_of_customers() {
        let aggregator = sample_aggregator();
        for (start, end) in [("20260101", "20260131"), ("20260101", "20261231"), ("20260301", "20260301")] {
            let report = aggregator.city_revenue("eindhoven", start, end).await;
            let sum: Amount = report.customers.iter().map(|c| c.revenue).sum();
            assert_eq!(sum, report.total_revenue);
        }
    }

    #[tokio::test]
    async fn test_customer_revenue_matches_brute_force() {
        let aggregator = sample_aggregator();
        let sales = sample_sales();
        for customer in sample_customers() {
            for (start, end) in [("20260101", "20260131"), ("20260110", "20260301"), ("20250101", "20251231")] {
                let expected: Amount = sales
                    .iter()
                    .filter(|s| s.customer_id == customer.id && start <= s.date.as_str() && s.date.as_str() <= end)
                    .map(|s| s.amount)
                    .sum();
                let report = aggregator.customer_revenue(&customer.id, start, end).await;
                assert_eq!(report.revenue, expected, "customer {} in {start}..{end}", customer.id);
            }
        }
    }
}
