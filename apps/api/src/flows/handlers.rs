//! Axum route handlers for the generation flows.

use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::flows::comments::{suggest_comments, CommentInput, CommentOutput};
use crate::flows::post::{generate_post, PostInput, PostOutput};
use crate::flows::profile::{generate_profile, ProfileInput, ProfileOutput};
use crate::flows::require_length;
use crate::flows::trends::{analyze_trends, TrendInput, TrendOutput};
use crate::state::AppState;

/// POST /api/v1/trends
///
/// Always 200 once the keywords pass validation. Model failures and malformed
/// answers both come back as an empty `trends` list.
pub async fn handle_analyze_trends(
    State(state): State<AppState>,
    Json(request): Json<TrendInput>,
) -> Result<Json<TrendOutput>, AppError> {
    require_length("keywords", &request.keywords, 1, None)?;

    let output = analyze_trends(state.llm.as_ref(), state.clock.as_ref(), &request).await;
    Ok(Json(output))
}

/// POST /api/v1/profiles/generate
pub async fn handle_generate_profile(
    State(state): State<AppState>,
    Json(request): Json<ProfileInput>,
) -> Result<Json<ProfileOutput>, AppError> {
    request.validate()?;
    let output = generate_profile(state.llm.as_ref(), &request).await?;
    Ok(Json(output))
}

/// POST /api/v1/posts/generate
pub async fn handle_generate_post(
    State(state): State<AppState>,
    Json(request): Json<PostInput>,
) -> Result<Json<PostOutput>, AppError> {
    request.validate()?;
    let output = generate_post(state.llm.as_ref(), &request).await?;
    Ok(Json(output))
}

/// POST /api/v1/comments/suggest
pub async fn handle_suggest_comments(
    State(state): State<AppState>,
    Json(request): Json<CommentInput>,
) -> Result<Json<CommentOutput>, AppError> {
    request.validate()?;
    let output = suggest_comments(state.llm.as_ref(), &request).await?;
    Ok(Json(output))
}
