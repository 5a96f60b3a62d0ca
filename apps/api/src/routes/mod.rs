pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::flows::handlers as flow_handlers;
use crate::profiles::handlers as profile_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Generation flows
        .route("/api/v1/trends", post(flow_handlers::handle_analyze_trends))
        .route(
            "/api/v1/profiles/generate",
            post(flow_handlers::handle_generate_profile),
        )
        .route(
            "/api/v1/posts/generate",
            post(flow_handlers::handle_generate_post),
        )
        .route(
            "/api/v1/comments/suggest",
            post(flow_handlers::handle_suggest_comments),
        )
        // User profile records
        .route(
            "/api/v1/users",
            post(profile_handlers::handle_create_user_profile)
                .get(profile_handlers::handle_get_user_profile),
        )
        .route(
            "/api/v1/users/:id",
            patch(profile_handlers::handle_update_user_profile)
                .delete(profile_handlers::handle_delete_user_profile),
        )
        .with_state(state)
}
