//! Booking store: durable users, drones and bookings plus slot locking.
//!
//! Any number of readers go straight to the pool. Writers of a booking first
//! take the in-process lock for their (drone, date) slot and then open a
//! transaction whose first statement claims the slot row, so the read of
//! existing windows and the insert commit or roll back together.

use booking_core::models::{optional_text, required_text};
use booking_core::{Booking, BookingFilter, BookingWindow, Drone, EnrichedBooking, User};
use chrono::NaiveDate;
use dashmap::DashMap;
use sqlx::{Sqlite, Transaction};
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

use crate::error::{BookingError, BookingResult};
use crate::persistence::{bookings, drones, users, Database};

/// Key of a booking partition: one drone on one date.
pub type SlotKey = (i64, NaiveDate);

/// Idle slot locks are dropped once the map grows past this size.
const SLOT_LOCK_PRUNE_THRESHOLD: usize = 1024;

pub struct Store {
    db: Database,
    slot_locks: DashMap<SlotKey, Arc<Mutex<()>>>,
}

impl Store {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            slot_locks: DashMap::new(),
        }
    }

    /// Create a user. The name is required; a blank email is stored as absent.
    pub async fn create_user(
        &self,
        name: Option<&str>,
        email_address: Option<&str>,
    ) -> BookingResult<User> {
        let name = required_text("name", name)?;
        let email_address = optional_text(email_address);
        let user = users::insert_user(self.db.pool(), &name, email_address.as_deref()).await?;
        Ok(user)
    }

    /// Create a drone. The name is required; a blank location is stored as absent.
    pub async fn create_drone(
        &self,
        name: Option<&str>,
        location: Option<&str>,
    ) -> BookingResult<Drone> {
        let name = required_text("name", name)?;
        let location = optional_text(location);
        let drone = drones::insert_drone(self.db.pool(), &name, location.as_deref()).await?;
        Ok(drone)
    }

    pub async fn get_user(&self, id: i64) -> BookingResult<User> {
        users::load_user(self.db.pool(), id)
            .await?
            .ok_or_else(|| BookingError::user_not_found(id))
    }

    pub async fn get_drone(&self, id: i64) -> BookingResult<Drone> {
        drones::load_drone(self.db.pool(), id)
            .await?
            .ok_or_else(|| BookingError::drone_not_found(id))
    }

    pub async fn list_users(&self) -> BookingResult<Vec<User>> {
        Ok(users::load_all_users(self.db.pool()).await?)
    }

    pub async fn list_drones(&self) -> BookingResult<Vec<Drone>> {
        Ok(drones::load_all_drones(self.db.pool()).await?)
    }

    /// List bookings with user and drone names, optionally narrowed.
    pub async fn list_bookings(&self, filter: BookingFilter) -> BookingResult<Vec<EnrichedBooking>> {
        bookings::load_bookings(self.db.pool(), filter).await
    }

    /// Take exclusive write access to one (drone, date) slot.
    ///
    /// Waits for any other writer of the same slot. Writers of other slots
    /// are not blocked here.
    pub async fn open_slot(&self, drone_id: i64, booked_on: NaiveDate) -> BookingResult<SlotGuard> {
        let lock = self.slot_lock((drone_id, booked_on));
        let lock_guard = lock.lock_owned().await;

        let mut tx = self.db.pool().begin().await?;
        bookings::claim_slot(&mut *tx, drone_id, booked_on).await?;
        debug!(drone_id, %booked_on, "Opened booking slot");

        Ok(SlotGuard {
            drone_id,
            booked_on,
            tx,
            _lock: lock_guard,
        })
    }

    /// Number of slot locks currently tracked.
    pub fn tracked_slots(&self) -> usize {
        self.slot_locks.len()
    }

    fn slot_lock(&self, key: SlotKey) -> Arc<Mutex<()>> {
        if self.slot_locks.len() > SLOT_LOCK_PRUNE_THRESHOLD {
            // Only the map holds an idle lock.
            self.slot_locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        }
        self.slot_locks
            .entry(key)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

/// Exclusive access to one (drone, date) slot, backed by an open transaction.
///
/// Dropping the guard without calling [`SlotGuard::insert_booking`] rolls the
/// transaction back.
pub struct SlotGuard {
    drone_id: i64,
    booked_on: NaiveDate,
    // Declared before the lock so the transaction is dropped first.
    tx: Transaction<'static, Sqlite>,
    _lock: OwnedMutexGuard<()>,
}

impl SlotGuard {
    /// Time windows of the bookings already committed in this slot.
    pub async fn bookings_for(&mut self) -> BookingResult<Vec<BookingWindow>> {
        let windows = bookings::load_windows(&mut *self.tx, self.drone_id, self.booked_on).await?;
        debug!(
            drone_id = self.drone_id,
            booked_on = %self.booked_on,
            existing = windows.len(),
            "Loaded slot windows"
        );
        Ok(windows)
    }

    /// Insert a booking into this slot and commit.
    ///
    /// Does not check for overlaps. Fails with `NotFound` when the user or
    /// drone does not exist, leaving the store untouched.
    pub async fn insert_booking(mut self, user_id: i64, window: BookingWindow) -> BookingResult<Booking> {
        if users::load_user(&mut *self.tx, user_id).await?.is_none() {
            return Err(BookingError::user_not_found(user_id));
        }
        if drones::load_drone(&mut *self.tx, self.drone_id).await?.is_none() {
            return Err(BookingError::drone_not_found(self.drone_id));
        }

        let booking =
            bookings::insert_booking(&mut *self.tx, user_id, self.drone_id, self.booked_on, window)
                .await?;
        self.tx.commit().await?;
        Ok(booking)
    }

    /// Give up the slot without writing anything.
    pub async fn release(self) -> BookingResult<()> {
        self.tx.rollback().await?;
        Ok(())
    }
}
