//! Parcel store - CRUD over the `parcel` table.
//!
//! Borrows a caller-owned `&Connection`. Address changes and deletion carry
//! the registered-status predicate inside the write statement, so a parcel
//! that left the registered state is never modified. When such a write
//! touches no row, a status read tells `NotFound` apart from `InvalidState`.
//!
//! CHANGELOG:
//! - 10/19/2026 - Compare-and-set status transitions; retry guarded writes on a registered re-read
//! - 10/19/2026 - Guarded writes as single conditional statements
//! - 10/19/2026 - Initial implementation

use rusqlite::{named_params, Connection};
use tracing::debug;

use super::queries;
use crate::error::StoreError;
use crate::parcel::{status, Parcel};

/// Data-access gateway for parcels.
#[derive(Debug, Clone, Copy)]
pub struct ParcelStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> ParcelStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Insert a parcel and return its storage-assigned number.
    ///
    /// `parcel.number` is ignored.
    pub fn add(&self, parcel: &Parcel) -> Result<i64, StoreError> {
        self.conn.execute(
            queries::INSERT_PARCEL,
            named_params! {
                ":client": parcel.client,
                ":status": parcel.status,
                ":address": parcel.address,
                ":created_at": parcel.created_at,
            },
        )?;
        let number = self.conn.last_insert_rowid();

        debug!(number, client = parcel.client, status = %parcel.status, "parcel added");
        Ok(number)
    }

    /// Fetch one parcel. Zero rows yields `StoreError::NotFound`.
    pub fn get(&self, number: i64) -> Result<Parcel, StoreError> {
        self.conn
            .query_row(
                queries::PARCEL_BY_NUMBER,
                named_params! { ":number": number },
                |row| {
                    Ok(Parcel {
                        number,
                        client: row.get(0)?,
                        status: row.get(1)?,
                        address: row.get(2)?,
                        created_at: row.get(3)?,
                    })
                },
            )
            .map_err(|err| StoreError::from_lookup(err, number))
    }

    /// All parcels of a client, in no particular order.
    ///
    /// An unknown client yields an empty list.
    pub fn get_by_client(&self, client: i64) -> Result<Vec<Parcel>, StoreError> {
        let mut stmt = self.conn.prepare(queries::PARCELS_BY_CLIENT)?;
        let rows = stmt.query_map(named_params! { ":client": client }, |row| {
            Ok(Parcel {
                number: row.get(0)?,
                client,
                status: row.get(1)?,
                address: row.get(2)?,
                created_at: row.get(3)?,
            })
        })?;

        let parcels = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(parcels)
    }

    /// Set the status unconditionally. An unknown number is not an error.
    pub fn set_status(&self, number: i64, new_status: &str) -> Result<(), StoreError> {
        let updated = self.conn.execute(
            queries::UPDATE_STATUS,
            named_params! {
                ":status": new_status,
                ":number": number,
            },
        )?;

        debug!(number, status = new_status, updated, "parcel status set");
        Ok(())
    }

    /// Move a parcel from `from` to `to` only if it still has status `from`.
    ///
    /// Returns `false` when the row is missing or its status moved on.
    pub fn transition_status(&self, number: i64, from: &str, to: &str) -> Result<bool, StoreError> {
        let updated = self.conn.execute(
            queries::UPDATE_STATUS_IF_CURRENT,
            named_params! {
                ":status": to,
                ":number": number,
                ":current": from,
            },
        )?;

        debug!(number, from, to, updated, "parcel status transition");
        Ok(updated > 0)
    }

    /// Change the address of a registered parcel.
    pub fn set_address(&self, number: i64, address: &str) -> Result<(), StoreError> {
        self.guarded(number, || {
            self.conn.execute(
                queries::UPDATE_ADDRESS_IF_REGISTERED,
                named_params! {
                    ":address": address,
                    ":number": number,
                    ":registered": status::REGISTERED,
                },
            )
        })?;

        debug!(number, "parcel address changed");
        Ok(())
    }

    /// Delete a registered parcel.
    pub fn delete(&self, number: i64) -> Result<(), StoreError> {
        self.guarded(number, || {
            self.conn.execute(
                queries::DELETE_IF_REGISTERED,
                named_params! {
                    ":number": number,
                    ":registered": status::REGISTERED,
                },
            )
        })?;

        debug!(number, "parcel deleted");
        Ok(())
    }

    /// Current status of a parcel.
    pub fn status(&self, number: i64) -> Result<String, StoreError> {
        self.conn
            .query_row(
                queries::STATUS_BY_NUMBER,
                named_params! { ":number": number },
                |row| row.get(0),
            )
            .map_err(|err| StoreError::from_lookup(err, number))
    }

    /// Run a registered-only write and classify a miss.
    ///
    /// A miss followed by a `registered` status read means the parcel moved
    /// back in between; the write is attempted once more.
    fn guarded<F>(&self, number: i64, write: F) -> Result<(), StoreError>
    where
        F: Fn() -> rusqlite::Result<usize>,
    {
        if write()? > 0 {
            return Ok(());
        }

        let mut current = self.status(number)?;
        if current == status::REGISTERED {
            if write()? > 0 {
                return Ok(());
            }
            current = self.status(number)?;
        }

        Err(StoreError::InvalidState {
            number,
            status: current,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::open_in_memory;
    use crate::db::schema::ensure_schema;
    use std::cell::Cell;

    fn setup() -> Connection {
        let conn = open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();
        conn
    }

    fn sample(client: i64, address: &str) -> Parcel {
        Parcel::new(client, address, "2024-01-01T00:00:00")
    }

    #[test]
    fn test_add_then_get_round_trips() {
        let conn = setup();
        let store = ParcelStore::new(&conn);
        let mut parcel = sample(1000, "test address");

        let number = store.add(&parcel).unwrap();
        assert!(number > 0);

        let stored = store.get(number).unwrap();
        parcel.number = number;
        assert_eq!(stored, parcel);
    }

    #[test]
    fn test_add_ignores_input_number() {
        let conn = setup();
        let store = ParcelStore::new(&conn);
        let mut parcel = sample(1, "A St");
        parcel.number = 999;

        let first = store.add(&parcel).unwrap();
        let second = store.add(&parcel).unwrap();

        assert_ne!(first, 999);
        assert_ne!(first, second);
    }

    #[test]
    fn test_get_missing_is_not_found() {
        let conn = setup();
        let store = ParcelStore::new(&conn);

        let err = store.get(12345).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { number: 12345 }));
    }

    #[test]
    fn test_get_by_client_isolates_clients() {
        let conn = setup();
        let store = ParcelStore::new(&conn);

        let mut expected = Vec::new();
        for address in ["A St", "B St", "C St"] {
            let mut parcel = sample(7, address);
            parcel.number = store.add(&parcel).unwrap();
            store.add(&sample(8, address)).unwrap();
            expected.push(parcel);
        }

        let mut found = store.get_by_client(7).unwrap();
        found.sort_by_key(|p| p.number);
        assert_eq!(found, expected);
    }

    #[test]
    fn test_get_by_unknown_client_is_empty() {
        let conn = setup();
        let store = ParcelStore::new(&conn);
        store.add(&sample(1, "A St")).unwrap();

        assert!(store.get_by_client(2).unwrap().is_empty());
    }

    #[test]
    fn test_set_status_is_reflected() {
        let conn = setup();
        let store = ParcelStore::new(&conn);
        let number = store.add(&sample(1, "A St")).unwrap();

        store.set_status(number, status::SENT).unwrap();
        assert_eq!(store.get(number).unwrap().status, status::SENT);

        store.set_status(number, "lost in transit").unwrap();
        assert_eq!(store.get(number).unwrap().status, "lost in transit");
    }

    #[test]
    fn test_set_status_on_missing_number_succeeds() {
        let conn = setup();
        let store = ParcelStore::new(&conn);

        store.set_status(777, status::DELIVERED).unwrap();
        assert!(store.get(777).unwrap_err().is_not_found());
    }

    #[test]
    fn test_set_address_while_registered() {
        let conn = setup();
        let store = ParcelStore::new(&conn);
        let number = store.add(&sample(1, "A St")).unwrap();

        store.set_address(number, "B St").unwrap();
        assert_eq!(store.get(number).unwrap().address, "B St");
    }

    #[test]
    fn test_set_address_rejected_after_sending() {
        let conn = setup();
        let store = ParcelStore::new(&conn);
        let number = store.add(&sample(1, "A St")).unwrap();
        store.set_status(number, status::SENT).unwrap();

        let err = store.set_address(number, "B St").unwrap_err();
        match err {
            StoreError::InvalidState { number: n, status: current } => {
                assert_eq!(n, number);
                assert_eq!(current, status::SENT);
            }
            other => panic!("expected InvalidState, got {other:?}"),
        }
        assert_eq!(store.get(number).unwrap().address, "A St");
    }

    #[test]
    fn test_set_address_missing_is_not_found() {
        let conn = setup();
        let store = ParcelStore::new(&conn);

        assert!(store.set_address(55, "B St").unwrap_err().is_not_found());
    }

    #[test]
    fn test_delete_registered_parcel() {
        let conn = setup();
        let store = ParcelStore::new(&conn);
        let number = store.add(&sample(1, "A St")).unwrap();

        store.delete(number).unwrap();
        assert!(store.get(number).unwrap_err().is_not_found());
    }

    #[test]
    fn test_delete_rejected_after_sending() {
        let conn = setup();
        let store = ParcelStore::new(&conn);
        let number = store.add(&sample(1, "A St")).unwrap();
        store.set_status(number, status::DELIVERED).unwrap();

        assert!(store.delete(number).unwrap_err().is_invalid_state());
        assert_eq!(store.get(number).unwrap().status, status::DELIVERED);
    }

    #[test]
    fn test_delete_missing_and_already_deleted() {
        let conn = setup();
        let store = ParcelStore::new(&conn);
        assert!(store.delete(404).unwrap_err().is_not_found());

        let number = store.add(&sample(1, "A St")).unwrap();
        store.delete(number).unwrap();
        assert!(store.delete(number).unwrap_err().is_not_found());
        assert!(store.set_address(number, "B St").unwrap_err().is_not_found());
    }

    #[test]
    fn test_storage_errors_are_not_not_found() {
        let conn = setup();
        let store = ParcelStore::new(&conn);
        conn.execute_batch("DROP TABLE parcel").unwrap();

        assert!(matches!(
            store.add(&sample(1, "A St")),
            Err(StoreError::Storage(_))
        ));
        assert!(matches!(store.get(1), Err(StoreError::Storage(_))));
        assert!(matches!(store.get_by_client(1), Err(StoreError::Storage(_))));
        assert!(matches!(store.delete(1), Err(StoreError::Storage(_))));
        assert!(matches!(
            store.set_status(1, status::SENT),
            Err(StoreError::Storage(_))
        ));
        assert!(matches!(
            store.set_address(1, "B St"),
            Err(StoreError::Storage(_))
        ));
        assert!(matches!(
            store.transition_status(1, status::REGISTERED, status::SENT),
            Err(StoreError::Storage(_))
        ));
    }

    #[test]
    fn test_transition_status_requires_current_status() {
        let conn = setup();
        let store = ParcelStore::new(&conn);
        let number = store.add(&sample(1, "A St")).unwrap();
        store.set_status(number, "returned").unwrap();

        let moved = store
            .transition_status(number, status::REGISTERED, status::SENT)
            .unwrap();
        assert!(!moved);
        assert_eq!(store.get(number).unwrap().status, "returned");

        let moved = store
            .transition_status(number, "returned", status::REGISTERED)
            .unwrap();
        assert!(moved);
        assert!(!store.transition_status(404, status::SENT, status::DELIVERED).unwrap());
    }

    #[test]
    fn test_guarded_write_retries_when_parcel_is_registered_again() {
        let conn = setup();
        let store = ParcelStore::new(&conn);
        let number = store.add(&sample(1, "A St")).unwrap();

        // First attempt misses as if the status had flipped away and back.
        let attempts = Cell::new(0);
        store
            .guarded(number, || {
                attempts.set(attempts.get() + 1);
                if attempts.get() == 1 {
                    return Ok(0);
                }
                conn.execute(
                    "UPDATE parcel SET address = 'B St' WHERE number = ?1",
                    [number],
                )
            })
            .unwrap();

        assert_eq!(attempts.get(), 2);
        assert_eq!(store.get(number).unwrap().address, "B St");
    }

    #[test]
    fn test_guarded_write_reports_observed_status() {
        let conn = setup();
        let store = ParcelStore::new(&conn);
        let number = store.add(&sample(1, "A St")).unwrap();

        let attempts = Cell::new(0);
        let err = store
            .guarded(number, || {
                attempts.set(attempts.get() + 1);
                conn.execute(
                    "UPDATE parcel SET status = 'sent' WHERE number = ?1",
                    [number],
                )?;
                Ok(0)
            })
            .unwrap_err();

        assert_eq!(attempts.get(), 1);
        match err {
            StoreError::InvalidState { status: current, .. } => assert_eq!(current, status::SENT),
            other => panic!("expected InvalidState, got {other:?}"),
        }
    }
}
