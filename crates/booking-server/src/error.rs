//! Errors surfaced by the store and the booking validator.

use booking_core::{ValidationError, CONFLICT_MESSAGE};
use thiserror::Error;

pub type BookingResult<T> = Result<T, BookingError>;

#[derive(Debug, Error)]
pub enum BookingError {
    /// Caller supplied a missing or malformed field.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The proposed window overlaps an existing booking.
    #[error("{}", CONFLICT_MESSAGE)]
    Conflict,
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },
    /// A stored row could not be decoded into a domain value.
    #[error("corrupt {entity} row {id}: {reason}")]
    CorruptRow {
        entity: &'static str,
        id: i64,
        reason: String,
    },
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl BookingError {
    pub fn user_not_found(id: i64) -> Self {
        Self::NotFound { entity: "user", id }
    }

    pub fn drone_not_found(id: i64) -> Self {
        Self::NotFound { entity: "drone", id }
    }
}
