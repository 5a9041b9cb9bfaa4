//! In-memory stand-in for the `bookings` collection.
use chrono::{DateTime, Utc};
use std::cell::{Cell, RefCell};
use thiserror::Error;

use crate::BookingStore;
use crate::record::BookingRecord;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("UserId is required")]
    MissingUserId,
    #[error("insert rejected: {0}")]
    InsertRejected(String),
}

/// Single-threaded booking store. Ids mimic 24-hex-digit document ids.
#[derive(Default)]
pub struct MemoryBookingStore {
    records: RefCell<Vec<BookingRecord>>,
    next_id: Cell<u64>,
    fail_next_insert: Cell<bool>,
    clock: Option<Box<dyn Fn() -> DateTime<Utc>>>,
}

impl std::fmt::Debug for MemoryBookingStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryBookingStore")
            .field("records", &self.records.borrow().len())
            .field("fail_next_insert", &self.fail_next_insert.get())
            .finish_non_exhaustive()
    }
}

impl MemoryBookingStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a fixed clock for stamping records.
    #[must_use]
    pub fn with_clock(clock: impl Fn() -> DateTime<Utc> + 'static) -> Self {
        Self {
            clock: Some(Box::new(clock)),
            ..Self::default()
        }
    }

    /// Make the next insert fail once, as a database outage would.
    pub fn fail_next_insert(&self) {
        self.fail_next_insert.set(true);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }

    fn now(&self) -> DateTime<Utc> {
        self.clock.as_ref().map_or_else(Utc::now, |clock| clock())
    }
}

impl BookingStore for MemoryBookingStore {
    type Error = StoreError;

    fn insert(&self, mut record: BookingRecord) -> Result<String, Self::Error> {
        if self.fail_next_insert.replace(false) {
            return Err(StoreError::InsertRejected("simulated outage".to_string()));
        }
        let id = format!("{:024x}", self.next_id.get() + 1);
        self.next_id.set(self.next_id.get() + 1);
        record.id = Some(id.clone());
        record.stamp(self.now());
        self.records.borrow_mut().push(record);
        Ok(id)
    }

    fn list_for_user(&self, user_id: &str) -> Result<Vec<BookingRecord>, Self::Error> {
        if user_id.is_empty() {
            return Err(StoreError::MissingUserId);
        }
        let mut bookings: Vec<BookingRecord> = self
            .records
            .borrow()
            .iter()
            .rev()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(bookings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{BookingSession, TransportType};

    fn record(user: &str) -> BookingRecord {
        let mut record =
            BookingRecord::from_session(&BookingSession::new("BK1", TransportType::Bus));
        record.user_id = user.to_string();
        record
    }

    #[test]
    fn insert_assigns_id_and_timestamps() {
        let store = MemoryBookingStore::new();
        let id = store.insert(record("user123")).unwrap();
        assert_eq!(id.len(), 24);
        let listed = store.list_for_user("user123").unwrap();
        assert_eq!(listed[0].id.as_deref(), Some(id.as_str()));
        assert!(listed[0].created_at.is_some());
        assert_eq!(listed[0].created_at, listed[0].updated_at);
    }

    #[test]
    fn listing_is_newest_first_and_per_user() {
        let ticks = Cell::new(0);
        let store = MemoryBookingStore::with_clock(move || {
            ticks.set(ticks.get() + 1);
            DateTime::from_timestamp(1_700_000_000 + ticks.get(), 0).unwrap()
        });
        let first = store.insert(record("u1")).unwrap();
        store.insert(record("u2")).unwrap();
        let third = store.insert(record("u1")).unwrap();
        let listed = store.list_for_user("u1").unwrap();
        let ids: Vec<_> = listed.iter().filter_map(|r| r.id.clone()).collect();
        assert_eq!(ids, vec![third, first]);
    }

    #[test]
    fn same_instant_keeps_newest_first() {
        let store = MemoryBookingStore::with_clock(|| DateTime::from_timestamp(5, 0).unwrap());
        let a = store.insert(record("u")).unwrap();
        let b = store.insert(record("u")).unwrap();
        let listed = store.list_for_user("u").unwrap();
        assert_eq!(listed[0].id.as_deref(), Some(b.as_str()));
        assert_eq!(listed[1].id.as_deref(), Some(a.as_str()));
    }

    #[test]
    fn empty_user_is_rejected() {
        let store = MemoryBookingStore::new();
        assert_eq!(store.list_for_user(""), Err(StoreError::MissingUserId));
    }

    #[test]
    fn failure_toggle_fires_once() {
        let store = MemoryBookingStore::new();
        store.fail_next_insert();
        assert!(store.insert(record("u")).is_err());
        assert!(store.insert(record("u")).is_ok());
        assert_eq!(store.len(), 1);
    }
}
