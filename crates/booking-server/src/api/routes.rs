//! REST API routes.

use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::api::{bookings, drones, request_id, users};
use crate::state::AppState;

/// Create the API router.
pub fn create_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/users", get(users::list_users).post(users::create_user))
        .route("/users/:id", get(users::get_user))
        .route("/drones", get(drones::list_drones).post(drones::create_drone))
        .route("/drones/:id", get(drones::get_drone))
        .route(
            "/bookings",
            get(bookings::list_bookings).post(bookings::create_booking),
        )
        .route("/bookings/user/:id", get(bookings::list_bookings_for_user))
        .route("/bookings/drone/:id", get(bookings::list_bookings_for_drone))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id::ensure_request_id))
}
