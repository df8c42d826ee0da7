//! Data ingestion for the revenue analysis system.
//!
//! This crate handles:
//! - Reading customer and sales CSV files
//! - Skipping and counting malformed rows
//! - Building immutable snapshots shared by the lookup services

pub mod loader;
pub mod snapshot;

pub use loader::{load_csv, load_or_empty, read_records, LoadStats};
pub use snapshot::Snapshot;
