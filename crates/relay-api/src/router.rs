//! Route definitions for the relay HTTP surface.
//!
//! The router receives `AppState` and passes it to all handlers via
//! Axum's `State` extractor.

use axum::{Router, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use relay_core::error::AppError;

use crate::error::ApiError;
use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
///
/// CORS is fully permissive: connection establishment is accepted from
/// any origin. Development-mode posture; origin restriction is an
/// external policy decision, not enforced here.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::client::landing))
        .route("/client", get(handlers::client::client_page))
        .route("/ws", get(handlers::ws::ws_upgrade))
        .route("/api/health", get(handlers::health::health))
        .fallback(not_found)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Fallback for unknown routes.
async fn not_found() -> ApiError {
    ApiError(AppError::not_found("No such route"))
}
