//! Parcel service - business operations on top of `ParcelStore`.
//!
//! CHANGELOG:
//! - 10/19/2026 - next_status uses a compare-and-set transition
//! - 10/19/2026 - Initial implementation

use chrono::{SecondsFormat, Utc};
use tracing::info;

use crate::db::store::ParcelStore;
use crate::error::StoreError;
use crate::parcel::{status, Parcel};

/// Lifecycle successor of a status, if any.
///
/// `delivered` and statuses outside the known vocabulary have none.
pub fn next_status_of(current: &str) -> Option<&'static str> {
    match current {
        status::REGISTERED => Some(status::SENT),
        status::SENT => Some(status::DELIVERED),
        _ => None,
    }
}

/// Parcel registration, lookup and lifecycle transitions.
#[derive(Debug, Clone, Copy)]
pub struct ParcelService<'conn> {
    store: ParcelStore<'conn>,
}

impl<'conn> ParcelService<'conn> {
    pub fn new(store: ParcelStore<'conn>) -> Self {
        Self { store }
    }

    /// Register a new parcel for a client, stamped with the current UTC time.
    pub fn register(&self, client: i64, address: &str) -> Result<Parcel, StoreError> {
        let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        let mut parcel = Parcel::new(client, address, created_at);

        parcel.number = self.store.add(&parcel)?;

        info!(number = parcel.number, client, "parcel registered");
        Ok(parcel)
    }

    pub fn parcel(&self, number: i64) -> Result<Parcel, StoreError> {
        self.store.get(number)
    }

    pub fn client_parcels(&self, client: i64) -> Result<Vec<Parcel>, StoreError> {
        self.store.get_by_client(client)
    }

    /// Move a parcel one step along registered -> sent -> delivered.
    ///
    /// Returns the new status, or `None` when the parcel has no successor.
    /// The write only lands if the status read is still current; otherwise
    /// the parcel is re-read and the step recomputed.
    pub fn next_status(&self, number: i64) -> Result<Option<String>, StoreError> {
        loop {
            let current = self.store.status(number)?;

            let Some(next) = next_status_of(&current) else {
                return Ok(None);
            };
            if self.store.transition_status(number, &current, next)? {
                info!(number, from = %current, to = next, "parcel status advanced");
                return Ok(Some(next.to_string()));
            }
        }
    }

    /// Set an arbitrary status. Values are not validated.
    pub fn set_status(&self, number: i64, new_status: &str) -> Result<(), StoreError> {
        self.store.set_status(number, new_status)
    }

    pub fn change_address(&self, number: i64, address: &str) -> Result<(), StoreError> {
        self.store.set_address(number, address)?;
        info!(number, "parcel address changed");
        Ok(())
    }

    pub fn delete(&self, number: i64) -> Result<(), StoreError> {
        self.store.delete(number)?;
        info!(number, "parcel deleted");
        Ok(())
    }
}
