//! Lookup services for the revenue analysis system.
//!
//! This crate provides:
//! - The customer directory (lookup by id, lookup by city)
//! - The sales ledger (inclusive date-range queries)
//! - HTTP routers exposing both over JSON

pub mod directory;
pub mod ledger;
pub mod routes;

pub use directory::Directory;
pub use ledger::Ledger;
pub use routes::{directory_router, ledger_router};
