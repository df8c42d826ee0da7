//! Configuration structures for the revenue analysis system.

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Customer directory service.
    #[serde(deserialize_with = "directory_section")]
    pub directory: ServiceConfig,
    /// Sales ledger service.
    #[serde(deserialize_with = "ledger_section")]
    pub ledger: ServiceConfig,
    /// Revenue analysis (tool server) configuration.
    pub analysis: AnalysisConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            directory: ServiceConfig::directory(),
            ledger: ServiceConfig::ledger(),
            analysis: AnalysisConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file. Missing sections fall back to defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("cannot read {}: {e}", path.display())))?;
        let config: Config = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values no component can run with.
    pub fn validate(&self) -> Result<()> {
        self.directory.validate("directory")?;
        self.ledger.validate("ledger")?;
        self.analysis.validate()
    }
}

/// Listen address and backing file for one lookup service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Socket address to bind, e.g. `127.0.0.1:5001`.
    pub bind: String,
    /// CSV file loaded at startup.
    pub data_path: PathBuf,
}

impl ServiceConfig {
    fn validate(&self, section: &str) -> Result<()> {
        if self.bind.trim().is_empty() {
            return Err(Error::config(format!("{section}.bind must not be empty")));
        }
        Ok(())
    }

    /// Defaults for the customer directory.
    pub fn directory() -> Self {
        Self {
            bind: "127.0.0.1:5001".to_string(),
            data_path: PathBuf::from("customers.csv"),
        }
    }

    /// Defaults for the sales ledger.
    pub fn ledger() -> Self {
        Self {
            bind: "127.0.0.1:5002".to_string(),
            data_path: PathBuf::from("sales.csv"),
        }
    }
}

/// A service section as written in a file; absent keys keep the defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ServiceSection {
    bind: Option<String>,
    data_path: Option<PathBuf>,
}

impl ServiceSection {
    fn over(self, defaults: ServiceConfig) -> ServiceConfig {
        ServiceConfig {
            bind: self.bind.unwrap_or(defaults.bind),
            data_path: self.data_path.unwrap_or(defaults.data_path),
        }
    }
}

fn directory_section<'de, D>(deserializer: D) -> std::result::Result<ServiceConfig, D::Error>
where
    D: Deserializer<'de>,
{
    ServiceSection::deserialize(deserializer).map(|s| s.over(ServiceConfig::directory()))
}

fn ledger_section<'de, D>(deserializer: D) -> std::result::Result<ServiceConfig, D::Error>
where
    D: Deserializer<'de>,
{
    ServiceSection::deserialize(deserializer).map(|s| s.over(ServiceConfig::ledger()))
}

/// Where the analysis layer finds its dependencies.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Base URL of the customer directory service.
    pub customer_api_url: String,
    /// Base URL of the sales ledger service.
    pub sales_api_url: String,
    /// Deadline for a single dependency call, in seconds.
    pub request_timeout_secs: u64,
}

impl AnalysisConfig {
    /// Dependency call deadline.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn validate(&self) -> Result<()> {
        if self.customer_api_url.trim().is_empty() {
            return Err(Error::config("analysis.customer_api_url must not be empty"));
        }
        if self.sales_api_url.trim().is_empty() {
            return Err(Error::config("analysis.sales_api_url must not be empty"));
        }
        if self.request_timeout_secs == 0 {
            return Err(Error::config("analysis.request_timeout_secs must be positive"));
        }
        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            customer_api_url: "http://localhost:5001".to_string(),
            sales_api_url: "http://localhost:5002".to_string(),
            request_timeout_secs: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.analysis.request_timeout_secs, 10);
        assert_eq!(config.analysis.customer_api_url, "http://localhost:5001");
        assert_eq!(config.directory.bind, "127.0.0.1:5001");
        assert_eq!(config.ledger.data_path, PathBuf::from("sales.csv"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"analysis": {{"request_timeout_secs": 3}}}}"#).unwrap();

        let config = Config::from_json_file(file.path()).unwrap();
        assert_eq!(config.analysis.request_timeout(), Duration::from_secs(3));
        assert_eq!(config.analysis.sales_api_url, "http://localhost:5002");
    }

    #[test]
    fn test_partial_service_section_keeps_defaults() {
        let config: Config = serde_json::from_str(
            r#"{"directory": {"bind": "0.0.0.0:5001"}, "ledger": {"data_path": "/srv/sales.csv"}}"#,
        )
        .unwrap();

        assert_eq!(config.directory.bind, "0.0.0.0:5001");
        assert_eq!(config.directory.data_path, PathBuf::from("customers.csv"));
        assert_eq!(config.ledger.bind, "127.0.0.1:5002");
        assert_eq!(config.ledger.data_path, PathBuf::from("/srv/sales.csv"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = Config::default();
        config.analysis.request_timeout_secs = 0;
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let result = Config::from_json_file("/nonexistent/revenue.json");
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
