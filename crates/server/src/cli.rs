//! Command-line interface.

use crate::logging::LogFormat;
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use revenue_core::Config;
use std::path::PathBuf;

/// Customer directory, sales ledger and revenue analysis servers.
#[derive(Debug, Parser)]
#[command(name = "revenue", version, about)]
pub struct Cli {
    /// JSON configuration file. Flags override its values.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log output format (logs always go to stderr).
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the customer directory over HTTP.
    Directory(ServiceArgs),
    /// Serve the sales ledger over HTTP.
    Ledger(ServiceArgs),
    /// Run the revenue analysis tool server on stdin/stdout.
    Tools(ToolsArgs),
}

#[derive(Debug, Args)]
pub struct ServiceArgs {
    /// Address to listen on.
    #[arg(long)]
    pub bind: Option<String>,
    /// CSV file to load at startup.
    #[arg(long)]
    pub data: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ToolsArgs {
    /// Base URL of the customer directory service.
    #[arg(long)]
    pub customer_api: Option<String>,
    /// Base URL of the sales ledger service.
    #[arg(long)]
    pub sales_api: Option<String>,
    /// Per-request timeout in seconds.
    #[arg(long)]
    pub timeout: Option<u64>,
    /// Join local CSV snapshots instead of calling the HTTP services.
    #[arg(long)]
    pub local: bool,
    /// Customer CSV used with `--local`.
    #[arg(long, requires = "local")]
    pub customers: Option<PathBuf>,
    /// Sales CSV used with `--local`.
    #[arg(long, requires = "local")]
    pub sales: Option<PathBuf>,
}

impl Cli {
    /// Configuration from the file (or defaults) with flag overrides applied.
    pub fn resolve_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_json_file(path)
                .with_context(|| format!("loading config from {}", path.display()))?,
            None => Config::default(),
        };

        match &self.command {
            Command::Directory(args) => args.apply(&mut config.directory),
            Command::Ledger(args) => args.apply(&mut config.ledger),
            Command::Tools(args) => {
                if let Some(url) = &args.customer_api {
                    config.analysis.customer_api_url = url.clone();
                }
                if let Some(url) = &args.sales_api {
                    config.analysis.sales_api_url = url.clone();
                }
                if let Some(secs) = args.timeout {
                    config.analysis.request_timeout_secs = secs;
                }
                if let Some(path) = &args.customers {
                    config.directory.data_path = path.clone();
                }
                if let Some(path) = &args.sales {
                    config.ledger.data_path = path.clone();
                }
            }
        }

        config.validate().context("invalid configuration")?;
        Ok(config)
    }
}

impl ServiceArgs {
    fn apply(&self, service: &mut revenue_core::ServiceConfig) {
        if let Some(bind) = &self.bind {
            service.bind = bind.clone();
        }
        if let Some(data) = &self.data {
            service.data_path = data.clone();
        }
    }
}
