//! Booking endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::error::BookingResult;
use crate::state::AppState;
use booking_core::{Booking, BookingFilter, BookingRequest, EnrichedBooking};

/// Propose a booking. Overlaps are answered with 409 and the conflict message.
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BookingRequest>,
) -> BookingResult<(StatusCode, Json<Booking>)> {
    let booking = state.validator.propose_request(&req).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// List bookings, optionally filtered by `user_id` and/or `drone_id`.
pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<BookingFilter>,
) -> BookingResult<Json<Vec<EnrichedBooking>>> {
    Ok(Json(state.store.list_bookings(filter).await?))
}

pub async fn list_bookings_for_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> BookingResult<Json<Vec<EnrichedBooking>>> {
    state.store.get_user(user_id).await?;
    let bookings = state
        .store
        .list_bookings(BookingFilter::for_user(user_id))
        .await?;
    Ok(Json(bookings))
}

pub async fn list_bookings_for_drone(
    State(state): State<Arc<AppState>>,
    Path(drone_id): Path<i64>,
) -> BookingResult<Json<Vec<EnrichedBooking>>> {
    state.store.get_drone(drone_id).await?;
    let bookings = state
        .store
        .list_bookings(BookingFilter::for_drone(drone_id))
        .await?;
    Ok(Json(bookings))
}
