//! Booking validator: the overlap check and the check-then-insert sequence.

use booking_core::{find_conflict, Booking, BookingRequest, ProposedBooking};
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::{BookingError, BookingResult};
use crate::state::Store;

#[derive(Clone)]
pub struct BookingValidator {
    store: Arc<Store>,
}

impl BookingValidator {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Parse a raw request and propose it.
    pub async fn propose_request(&self, request: &BookingRequest) -> BookingResult<Booking> {
        let proposal = ProposedBooking::try_from(request)?;
        self.propose(proposal).await
    }

    /// Book a drone if the window is free on that date.
    ///
    /// Existing windows are read and the new booking written while holding
    /// the slot for `(drone_id, booked_on)`, so two overlapping proposals
    /// can never both commit.
    pub async fn propose(&self, proposal: ProposedBooking) -> BookingResult<Booking> {
        let mut slot = self
            .store
            .open_slot(proposal.drone_id, proposal.booked_on)
            .await?;

        let existing = slot.bookings_for().await?;
        if let Some(taken) = find_conflict(&proposal.window, &existing) {
            warn!(
                drone_id = proposal.drone_id,
                booked_on = %proposal.booked_on,
                requested = %proposal.window,
                existing = %taken,
                "Rejected overlapping booking"
            );
            slot.release().await?;
            return Err(BookingError::Conflict);
        }

        let booking = slot.insert_booking(proposal.user_id, proposal.window).await?;
        info!(
            booking_id = booking.id,
            user_id = booking.user_id,
            drone_id = booking.drone_id,
            booked_on = %booking.booked_on,
            window = %booking.window(),
            "Created booking"
        );
        Ok(booking)
    }
}
