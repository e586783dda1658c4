//! Application state shared across all handlers.

use std::sync::Arc;

use relay_core::config::AppConfig;
use relay_session::SessionRouter;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Process-wide session router
    pub sessions: Arc<SessionRouter>,
}

impl AppState {
    /// Creates the application state from loaded configuration.
    pub fn new(config: AppConfig) -> Self {
        let sessions = Arc::new(SessionRouter::new(config.relay.clone()));
        Self {
            config: Arc::new(config),
            sessions,
        }
    }
}
