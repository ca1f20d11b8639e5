//! # Booking Store
//!
//! The user's bookings, newest first, persisted under the `myBookings` key.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Booking Lifecycle                                    │
//! │                                                                         │
//! │   create(property, stay, breakdown)                                     │
//! │        │  validate stay ─── invalid ──► ValidationError                 │
//! │        │  new id (BK-<uuid>)                                            │
//! │        ▼                                                                │
//! │   ┌───────────┐   cancel(id)   ┌───────────┐                            │
//! │   │ Confirmed │ ─────────────► │ Cancelled │ ◄── cancel(id) (no-op)     │
//! │   └─────┬─────┘                └─────┬─────┘                            │
//! │         │ delete(id)                 │ delete(id)                       │
//! │         ▼                            ▼                                  │
//! │      (gone)                       (gone)                                │
//! │                                                                         │
//! │   Unknown id on cancel/delete ──► NotFound                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Filters and stats are projections over the stored list, evaluated against
//! the clock at call time; nothing derived is persisted.

use chrono::{DateTime, Utc};
use stayhub_core::validation::{validate_id, validate_nightly_rate};
use stayhub_core::{
    BookingFilter, BookingRecord, BookingStats, BookingStatus, PriceBreakdown, Property,
    StayRequest, BOOKINGS_KEY,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::persist::{load_collection, save_collection};
use crate::storage::KeyValueStorage;

/// Prefix of every generated booking id.
pub const BOOKING_ID_PREFIX: &str = "BK-";

/// The user's booking records.
#[derive(Debug)]
pub struct BookingStore<S> {
    storage: S,
    /// Newest first.
    records: Vec<BookingRecord>,
}

impl<S: KeyValueStorage> BookingStore<S> {
    pub fn new(storage: S) -> Self {
        BookingStore {
            storage,
            records: Vec::new(),
        }
    }

    /// Creates a booking store and rehydrates it from `storage`.
    pub fn open(storage: S) -> Self {
        let mut store = Self::new(storage);
        store.rehydrate();
        store
    }

    /// Replaces the in-memory records with what storage holds.
    ///
    /// Stored order is kept as-is. Returns the number of records loaded.
    pub fn rehydrate(&mut self) -> usize {
        self.records = load_collection(&self.storage, BOOKINGS_KEY);
        debug!(count = self.records.len(), "Bookings rehydrated");
        self.records.len()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Records a confirmed booking of `property` for `stay`.
    ///
    /// The breakdown is frozen into the record as given; callers normally
    /// pass the quote they just showed the user.
    ///
    /// ## Errors
    /// - `Validation` if the stay lacks dates, has check-out on or before
    ///   check-in, has occupancy out of range, or the property has no
    ///   positive nightly rate (nothing is recorded)
    /// - Persistence errors if the write fails (the record is kept in memory)
    pub fn create(
        &mut self,
        property: &Property,
        stay: &StayRequest,
        breakdown: PriceBreakdown,
    ) -> StoreResult<BookingRecord> {
        stay.validate_for_booking()?;
        validate_id("propertyId", &property.id)?;
        validate_nightly_rate(property.price)?;

        let record = BookingRecord {
            booking_id: self.next_booking_id(),
            property_id: property.id.clone(),
            property_name: property.name.clone(),
            property_image: property.image.clone(),
            property_location: property.location.clone(),
            property_type: Some(property.property_type.clone()),
            stay_request: stay.clone(),
            price_breakdown: breakdown,
            booking_date: Utc::now(),
            status: BookingStatus::Confirmed,
        };

        info!(
            booking_id = %record.booking_id,
            property_id = %record.property_id,
            total = %record.price_breakdown.total,
            "Booking confirmed"
        );

        self.records.insert(0, record.clone());
        self.persist()?;
        Ok(record)
    }

    /// Marks a booking cancelled. Cancelling twice is a no-op.
    pub fn cancel(&mut self, booking_id: &str) -> StoreResult<()> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.booking_id == booking_id)
            .ok_or_else(|| StoreError::not_found("Booking", booking_id))?;

        if record.status == BookingStatus::Cancelled {
            debug!(booking_id = %booking_id, "Booking already cancelled");
            return Ok(());
        }

        record.status = BookingStatus::Cancelled;
        info!(booking_id = %booking_id, "Booking cancelled");
        self.persist()
    }

    /// Permanently removes a booking, returning the removed record.
    pub fn delete(&mut self, booking_id: &str) -> StoreResult<BookingRecord> {
        let index = self
            .records
            .iter()
            .position(|r| r.booking_id == booking_id)
            .ok_or_else(|| StoreError::not_found("Booking", booking_id))?;

        let removed = self.records.remove(index);
        info!(booking_id = %booking_id, "Booking deleted");
        self.persist()?;
        Ok(removed)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn get(&self, booking_id: &str) -> Option<&BookingRecord> {
        self.records.iter().find(|r| r.booking_id == booking_id)
    }

    /// Every record, newest first.
    pub fn records(&self) -> &[BookingRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records matching `filter` right now.
    pub fn list(&self, filter: BookingFilter) -> Vec<BookingRecord> {
        self.list_at(filter, Utc::now())
    }

    /// Records matching `filter` at instant `now`, newest first.
    pub fn list_at(&self, filter: BookingFilter, now: DateTime<Utc>) -> Vec<BookingRecord> {
        self.records
            .iter()
            .filter(|r| r.matches(filter, now))
            .cloned()
            .collect()
    }

    pub fn stats(&self) -> BookingStats {
        self.stats_at(Utc::now())
    }

    /// Per-tab counts at instant `now`.
    pub fn stats_at(&self, now: DateTime<Utc>) -> BookingStats {
        BookingStats::tally(&self.records, now)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Generates `BK-<32 hex digits>`, unique within this store.
    fn next_booking_id(&self) -> String {
        loop {
            let id = format!(
                "{}{}",
                BOOKING_ID_PREFIX,
                Uuid::new_v4().simple().to_string().to_uppercase()
            );
            if self.get(&id).is_none() {
                return id;
            }
            warn!(booking_id = %id, "Generated booking id collided; retrying");
        }
    }

    fn persist(&self) -> StoreResult<()> {
        save_collection(&self.storage, BOOKINGS_KEY, &self.records)
    }
}
