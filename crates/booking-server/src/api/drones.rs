//! Drone endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::error::BookingResult;
use crate::state::AppState;
use booking_core::{CreateDroneRequest, Drone};

pub async fn create_drone(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateDroneRequest>,
) -> BookingResult<(StatusCode, Json<Drone>)> {
    let drone = state
        .store
        .create_drone(req.name.as_deref(), req.location.as_deref())
        .await?;
    tracing::info!("Created drone '{}' ({})", drone.name, drone.id);
    Ok((StatusCode::CREATED, Json(drone)))
}

pub async fn list_drones(State(state): State<Arc<AppState>>) -> BookingResult<Json<Vec<Drone>>> {
    Ok(Json(state.store.list_drones().await?))
}

pub async fn get_drone(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> BookingResult<Json<Drone>> {
    state.store.get_drone(id).await.map(Json)
}
