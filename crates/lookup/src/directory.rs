//! Customer directory: point lookups by id and set lookups by city.

use revenue_core::Customer;
use revenue_ingestion::Snapshot;

/// Read-only customer directory backed by a startup snapshot.
#[derive(Debug, Clone)]
pub struct Directory {
    customers: Snapshot<Customer>,
}

impl Directory {
    /// Create a directory over loaded customers.
    pub fn new(customers: Snapshot<Customer>) -> Self {
        Self { customers }
    }

    /// Find a customer by exact id. First match in load order wins.
    pub fn lookup_by_id(&self, id: &str) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }

    /// All customers whose city equals `city` ignoring case, in load order.
    pub fn lookup_by_city(&self, city: &str) -> Vec<&Customer> {
        let needle = city.to_lowercase();
        self.customers
            .iter()
            .filter(|c| c.city.to_lowercase() == needle)
            .collect()
    }

    /// Number of customers.
    pub fn len(&self) -> usize {
        self.customers.len()
    }

    /// Whether the directory is empty (nothing loaded).
    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }
}

impl From<Vec<Customer>> for Directory {
    fn from(customers: Vec<Customer>) -> Self {
        Self::new(customers.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_customer(id: &str, name: &str, city: &str) -> Customer {
        Customer {
            id: id.to_string(),
            name: name.to_string(),
            city: city.to_string(),
        }
    }

    fn sample_directory() -> Directory {
        Directory::from(vec![
            make_customer("011", "Alpha", "Rome"),
            make_customer("012", "Beta", "Eindhoven"),
            make_customer("013", "Gamma", "eindhoven"),
            make_customer("014", "Delta", "Paris"),
            make_customer("015", "Epsilon", "EINDHOVEN"),
        ])
    }

    #[test]
    fn test_lookup_by_id() {
        let directory = sample_directory();
        let customer = directory.lookup_by_id("012").unwrap();
        assert_eq!(customer.name, "Beta");
    }

    #[test]
    fn test_lookup_by_id_is_exact() {
        let directory = sample_directory();
        assert!(directory.lookup_by_id("11").is_none());
        assert!(directory.lookup_by_id("011 ").is_none());
        assert!(directory.lookup_by_id("").is_none());
    }

    #[test]
    fn test_lookup_by_city_ignores_case_keeps_order() {
        let directory = sample_directory();
        let ids: Vec<&str> = directory
            .lookup_by_city("EiNdHoVeN")
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, vec!["012", "013", "015"]);
    }

    #[test]
    fn test_lookup_by_city_no_whitespace_normalisation() {
        let directory = sample_directory();
        assert!(directory.lookup_by_city("Rome ").is_empty());
        assert!(directory.lookup_by_city("Berlin").is_empty());
    }

    #[test]
    fn test_empty_directory() {
        let directory = Directory::new(Snapshot::empty());
        assert!(directory.is_empty());
        assert!(directory.lookup_by_id("011").is_none());
        assert!(directory.lookup_by_city("Rome").is_empty());
    }
}
