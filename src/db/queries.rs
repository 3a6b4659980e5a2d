//! SQL statements for the `parcel` table.
//!
//! Every parameter is bound by name (`:number`, `:client`, ...) through
//! `rusqlite::named_params!`.
//!
//! CHANGELOG:
//! - 10/19/2026 - Guarded address/delete statements carry the status predicate
//! - 10/19/2026 - Initial query constants

/// Insert a new parcel. The number column is assigned by SQLite.
pub const INSERT_PARCEL: &str = r#"
INSERT INTO parcel (client, status, address, created_at)
VALUES (:client, :status, :address, :created_at)
"#;

/// Fetch one parcel by number.
pub const PARCEL_BY_NUMBER: &str = r#"
SELECT client, status, address, created_at
FROM parcel
WHERE number = :number
"#;

/// Fetch every parcel owned by a client. No ordering guarantee.
pub const PARCELS_BY_CLIENT: &str = r#"
SELECT number, status, address, created_at
FROM parcel
WHERE client = :client
"#;

pub const UPDATE_STATUS: &str = r#"
UPDATE parcel SET status = :status
WHERE number = :number
"#;

/// Compare-and-set status change.
/// Parameters: :status, :number, :current
pub const UPDATE_STATUS_IF_CURRENT: &str = r#"
UPDATE parcel SET status = :status
WHERE number = :number
  AND status = :current
"#;

/// Current status of one parcel.
pub const STATUS_BY_NUMBER: &str = r#"
SELECT status
FROM parcel
WHERE number = :number
"#;

/// Update the address only while the parcel is still registered.
/// Parameters: :address, :number, :registered
pub const UPDATE_ADDRESS_IF_REGISTERED: &str = r#"
UPDATE parcel SET address = :address
WHERE number = :number
  AND status = :registered
"#;

/// Delete the parcel only while it is still registered.
/// Parameters: :number, :registered
pub const DELETE_IF_REGISTERED: &str = r#"
DELETE FROM parcel
WHERE number = :number
  AND status = :registered
"#;
