//! parcel-tracker library
//!
//! Parcel records in SQLite: the `ParcelStore` gateway, the business
//! facade on top of it, and output helpers shared with the CLI binary.
//!
//! CHANGELOG:
//! - 10/19/2026 - Initial library structure

pub mod commands;
pub mod db;
pub mod error;
pub mod output;
pub mod parcel;
pub mod service;

pub use db::store::ParcelStore;
pub use error::StoreError;
pub use parcel::Parcel;
pub use service::ParcelService;
