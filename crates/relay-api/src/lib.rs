//! # relay-api
//!
//! HTTP layer for the relay built on Axum.
//!
//! Provides the WebSocket upgrade endpoint, the landing redirect with an
//! embedded static test client, a health endpoint, and error mapping.

pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
