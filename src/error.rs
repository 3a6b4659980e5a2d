//! Errors returned by the parcel store.

use thiserror::Error;

/// Errors that can occur while reading or mutating parcels.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("parcel {number} not found")]
    NotFound { number: i64 },

    #[error("invalid status: parcel {number} not registered (status: {status})")]
    InvalidState { number: i64, status: String },

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    pub fn is_invalid_state(&self) -> bool {
        matches!(self, StoreError::InvalidState { .. })
    }

    /// Map a single-row lookup failure, turning "no rows" into `NotFound`.
    pub(crate) fn from_lookup(err: rusqlite::Error, number: i64) -> Self {
        match err {
            rusqlite::Error::QueryReturnedNoRows => StoreError::NotFound { number },
            other => StoreError::Storage(other),
        }
    }
}
