use std::sync::Arc;

use sqlx::PgPool;

use crate::flows::clock::Clock;
use crate::llm_client::ModelInvoker;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Model seam. `LlmClient` in production.
    pub llm: Arc<dyn ModelInvoker>,
    /// Time source for synthesized trend ids.
    pub clock: Arc<dyn Clock>,
}
