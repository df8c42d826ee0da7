//! Revenue analysis for the revenue analysis system.
//!
//! This crate provides:
//! - The customer/sales join and revenue aggregation
//! - Data sources: in-process lookups or HTTP clients with timeouts
//! - The tool-call interface exposed to analysis clients

pub mod aggregator;
pub mod client;
pub mod source;
pub mod tools;

pub use aggregator::{join_city, join_customer, tally_by_customer, tally_for, RevenueAggregator, Tally};
pub use client::{HttpDirectory, HttpLedger};
pub use source::{CustomerSource, SalesSource};
pub use tools::{tool_definitions, ToolDefinition, ToolError, CITY_REVENUE_TOOL, CUSTOMER_REVENUE_TOOL};
