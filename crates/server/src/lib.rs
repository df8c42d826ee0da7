//! Process entry points for the revenue analysis system.
//!
//! This crate provides:
//! - The `revenue` command-line interface
//! - Logging setup
//! - HTTP servers for the customer directory and sales ledger
//! - The stdio tool server wrapping the revenue aggregator

pub mod cli;
pub mod logging;
pub mod serve;
pub mod stdio;

pub use cli::{Cli, Command};
pub use stdio::ToolServer;
