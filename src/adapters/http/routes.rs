//! Route table.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    export, generate, get_issue, get_provider, get_template, get_tracker, health,
    list_generations, save_provider, save_template, save_tracker, test_provider, test_tracker,
};
use super::state::AppState;

/// The full API router.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/config/tracker", post(save_tracker).get(get_tracker))
        .route("/api/config/tracker/test", post(test_tracker))
        .route("/api/config/provider", post(save_provider).get(get_provider))
        .route("/api/config/provider/test", post(test_provider))
        .route("/api/config/template", post(save_template).get(get_template))
        .route("/api/issues/:key", get(get_issue))
        .route("/api/generate", post(generate))
        .route("/api/generations", get(list_generations))
        .route("/api/export/:id/:format", get(export))
        .with_state(state)
}
