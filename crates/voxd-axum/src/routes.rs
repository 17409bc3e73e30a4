//! Route definitions and router construction.

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/synthesize", post(handlers::synthesize::synthesize))
        .route("/health", get(handlers::health::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
