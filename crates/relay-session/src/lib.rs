//! # relay-session
//!
//! Session router for the relay server. Provides:
//!
//! - Identifier extraction from the connection's establishment query
//! - A concurrent identifier → connection registry
//! - Plain-text frame parsing (`recipientId:content`)
//! - Forward-or-reject routing with online/offline detection
//!
//! The router is transport-agnostic: it hands each registered connection
//! an outbound `mpsc` channel and never touches WebSocket types directly.

pub mod frame;
pub mod handle;
pub mod identity;
pub mod registry;
pub mod router;

pub use handle::ConnectionHandle;
pub use registry::SessionRegistry;
pub use router::SessionRouter;
