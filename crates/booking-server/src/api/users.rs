//! User endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::error::BookingResult;
use crate::state::AppState;
use booking_core::{CreateUserRequest, User};

pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateUserRequest>,
) -> BookingResult<(StatusCode, Json<User>)> {
    let user = state
        .store
        .create_user(req.name.as_deref(), req.email_address.as_deref())
        .await?;
    tracing::info!("Created user '{}' ({})", user.name, user.id);
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn list_users(State(state): State<Arc<AppState>>) -> BookingResult<Json<Vec<User>>> {
    Ok(Json(state.store.list_users().await?))
}

pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> BookingResult<Json<User>> {
    state.store.get_user(id).await.map(Json)
}
