//! Parcel record and status vocabulary.
//!
//! CHANGELOG:
//! - 10/19/2026 - Initial implementation

use serde::{Deserialize, Serialize};

/// Known parcel statuses.
///
/// The store only checks for `REGISTERED`; anything else is accepted as-is.
pub mod status {
    /// Initial status. Address changes and deletion are allowed only here.
    pub const REGISTERED: &str = "registered";
    pub const SENT: &str = "sent";
    pub const DELIVERED: &str = "delivered";
}

/// A single row of the `parcel` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parcel {
    /// Storage-assigned identifier. Ignored by `ParcelStore::add`.
    pub number: i64,
    pub client: i64,
    pub status: String,
    pub address: String,
    /// Stored verbatim, never parsed.
    pub created_at: String,
}

impl Parcel {
    /// New parcel in the registered state, not yet stored.
    pub fn new(client: i64, address: impl Into<String>, created_at: impl Into<String>) -> Self {
        Self {
            number: 0,
            client,
            status: status::REGISTERED.to_string(),
            address: address.into(),
            created_at: created_at.into(),
        }
    }

    pub fn is_registered(&self) -> bool {
        self.status == status::REGISTERED
    }
}
