//! Table bootstrap for callers that own the connection.
//!
//! `ParcelStore` never creates tables itself; the CLI and the tests call
//! `ensure_schema` right after opening a connection.
//!
//! CHANGELOG:
//! - 10/19/2026 - Initial implementation

use rusqlite::Connection;

const CREATE_PARCEL_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS parcel (
    number     INTEGER PRIMARY KEY AUTOINCREMENT,
    client     INTEGER NOT NULL,
    status     TEXT    NOT NULL,
    address    TEXT    NOT NULL,
    created_at TEXT    NOT NULL
);
CREATE INDEX IF NOT EXISTS parcel_client_idx ON parcel (client);
"#;

/// Create the `parcel` table and its client index if missing.
pub fn ensure_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(CREATE_PARCEL_TABLE)
}
