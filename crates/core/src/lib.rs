//! Core types and configuration for the revenue analysis system.
//!
//! This crate provides shared types used across all other crates:
//! - Directory and ledger records (customers, sales)
//! - Revenue reports
//! - Configuration structures
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use config::{AnalysisConfig, Config, ServiceConfig};
pub use error::{Error, Result};
pub use types::*;
