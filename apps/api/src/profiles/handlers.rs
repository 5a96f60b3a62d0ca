use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user_profile::UserProfile;
use crate::profiles::service::{
    create_user_profile, delete_user_profile, get_user_profile, update_user_profile,
    NewUserProfile, UserProfileUpdate,
};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: String,
}

/// POST /api/v1/users
///
/// Idempotent: returns the existing record when the user already has one.
pub async fn handle_create_user_profile(
    State(state): State<AppState>,
    Json(request): Json<NewUserProfile>,
) -> Result<Json<UserProfile>, AppError> {
    Ok(Json(create_user_profile(&state.db, &request).await?))
}

/// GET /api/v1/users?user_id=…
pub async fn handle_get_user_profile(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<UserProfile>, AppError> {
    let profile = get_user_profile(&state.db, &params.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile for user {} not found", params.user_id)))?;
    Ok(Json(profile))
}

/// PATCH /api/v1/users/:id
pub async fn handle_update_user_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UserProfileUpdate>,
) -> Result<Json<UserProfile>, AppError> {
    Ok(Json(update_user_profile(&state.db, id, &request).await?))
}

/// DELETE /api/v1/users/:id
pub async fn handle_delete_user_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    delete_user_profile(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
