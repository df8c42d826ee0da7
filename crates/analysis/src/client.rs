//! HTTP clients for the directory and ledger services.
//!
//! Each call is bounded by the configured timeout. Failures are logged
//! and degrade to absent/empty at this boundary.

use reqwest::{Client, Url};
use revenue_core::{AnalysisConfig, Customer, Error, Result, Sale};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::source::{CustomerSource, SalesSource};

/// Shared request plumbing for both services.
#[derive(Debug, Clone)]
struct Endpoint {
    client: Client,
    base_url: Url,
}

impl Endpoint {
    fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| Error::config(format!("invalid base url {base_url:?}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::config(format!("{base_url} cannot be used as a base url")));
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    /// Base URL with the given path segments appended, each percent-encoded.
    ///
    /// `.` and `..` cannot be sent as a segment; URL normalization would
    /// turn them into a different path.
    fn url(&self, segments: &[&str]) -> Result<Url> {
        if let Some(bad) = segments.iter().find(|s| matches!(**s, "." | "..")) {
            return Err(Error::upstream(format!("{bad:?} cannot be used as a path segment")));
        }
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!(url = %url, "GET");
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| Error::upstream(format!("request to {url} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::upstream(format!("{url} answered {status}")));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| Error::upstream(format!("undecodable body from {url}: {e}")))
    }
}

/// Customer reply as sent by the directory. `{}` means "not found".
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CustomerReply {
    #[serde(alias = "custid")]
    id: String,
    #[serde(alias = "custname")]
    name: String,
    city: String,
}

impl CustomerReply {
    fn into_customer(self) -> Option<Customer> {
        if self.id.is_empty() {
            return None;
        }
        Some(Customer {
            id: self.id,
            name: self.name,
            city: self.city,
        })
    }
}

/// Customer directory reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpDirectory {
    endpoint: Endpoint,
}

impl HttpDirectory {
    /// Create a client for the directory at `base_url`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            endpoint: Endpoint::new(base_url, timeout)?,
        })
    }

    /// Create a client from the analysis configuration.
    pub fn from_config(config: &AnalysisConfig) -> Result<Self> {
        Self::new(&config.customer_api_url, config.request_timeout())
    }

    /// `GET /customer/{id}`.
    pub async fn fetch_customer(&self, id: &str) -> Result<Option<Customer>> {
        let url = self.endpoint.url(&["customer", id])?;
        let reply: CustomerReply = self.endpoint.get_json(url).await?;
        Ok(reply.into_customer())
    }

    /// `GET /customers/city/{city}`.
    pub async fn fetch_city(&self, city: &str) -> Result<Vec<Customer>> {
        let url = self.endpoint.url(&["customers", "city", city])?;
        self.endpoint.get_json(url).await
    }
}

impl CustomerSource for HttpDirectory {
    async fn lookup_by_id(&self, id: &str) -> Option<Customer> {
        match self.fetch_customer(id).await {
            Ok(customer) => customer,
            Err(e) => {
                warn!(id, error = %e, "customer lookup failed, treating as absent");
                None
            }
        }
    }

    async fn lookup_by_city(&self, city: &str) -> Vec<Customer> {
        match self.fetch_city(city).await {
            Ok(customers) => customers,
            Err(e) => {
                warn!(city, error = %e, "city lookup failed, treating as empty");
                Vec::new()
            }
        }
    }
}

/// Sales ledger reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpLedger {
    endpoint: Endpoint,
}

impl HttpLedger {
    /// Create a client for the ledger at `base_url`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            endpoint: Endpoint::new(base_url, timeout)?,
        })
    }

    /// Create a client from the analysis configuration.
    pub fn from_config(config: &AnalysisConfig) -> Result<Self> {
        Self::new(&config.sales_api_url, config.request_timeout())
    }

    /// `GET /sales?start_date=..&end_date=..`.
    pub async fn fetch_sales(&self, start: &str, end: &str) -> Result<Vec<Sale>> {
        let mut url = self.endpoint.url(&["sales"])?;
        url.query_pairs_mut()
            .append_pair("start_date", start)
            .append_pair("end_date", end);
        self.endpoint.get_json(url).await
    }
}

impl SalesSource for HttpLedger {
    async fn query_by_date_range(&self, start: &str, end: &str) -> Vec<Sale> {
        match self.fetch_sales(start, end).await {
            Ok(sales) => sales,
            Err(e) => {
                warn!(start, end, error = %e, "sales query failed, treating as empty");
                Vec::new()
            }
        }
    }
}
