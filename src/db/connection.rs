//! SQLite connection management for the parcel database.
//!
//! Connections are opened here by the binary and handed to `ParcelStore`;
//! the store itself never opens or closes them.
//!
//! CHANGELOG:
//! - 10/19/2026 - Initial implementation

use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::{Path, PathBuf};

/// Environment variable overriding the database location.
pub const DB_PATH_ENV: &str = "PARCEL_TRACKER_DB";

/// Default parcel database path.
pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("parcel-tracker")
        .join("parcels.db")
}

/// Open (creating if needed) a read-write connection to the parcel database.
pub fn open_db(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
    }

    Connection::open_with_flags(
        path,
        rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
            | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
            | rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .with_context(|| format!("Failed to open parcel database at {:?}", path))
}

/// Open a private in-memory database.
pub fn open_in_memory() -> Result<Connection> {
    Connection::open_in_memory().context("Failed to open in-memory parcel database")
}
