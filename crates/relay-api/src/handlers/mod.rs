//! HTTP request handlers.

pub mod client;
pub mod health;
pub mod ws;
