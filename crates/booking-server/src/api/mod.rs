//! API routes for the booking server.

pub mod bookings;
pub mod drones;
mod error;
pub mod request_id;
mod routes;
pub mod users;

use axum::Router;

pub fn routes() -> Router<std::sync::Arc<crate::state::AppState>> {
    routes::create_router()
}

#[cfg(test)]
mod tests;
