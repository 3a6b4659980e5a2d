//! Database module for SQLite access to the parcel table.
//!
//! CHANGELOG:
//! - 10/19/2026 - Initial module structure

pub mod connection;
pub mod queries;
pub mod schema;
pub mod store;
