//! Individual connection handle.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use uuid::Uuid;

/// A handle to a single registered connection.
///
/// Holds the sender side of the connection's outbound channel plus the
/// identifier the connection registered under. The channel serializes
/// writes, so `send` is safe to call concurrently from any number of
/// sender tasks targeting the same recipient.
#[derive(Debug)]
pub struct ConnectionHandle {
    /// Unique connection ID, used only for tracing.
    pub conn_id: Uuid,
    /// Identifier this connection registered under.
    pub identifier: String,
    /// When the connection was established.
    pub connected_at: DateTime<Utc>,
    /// Sender for outbound frames.
    sender: mpsc::Sender<String>,
    /// Whether the connection is still alive.
    alive: AtomicBool,
}

impl ConnectionHandle {
    /// Create a new connection handle.
    pub fn new(identifier: String, sender: mpsc::Sender<String>) -> Self {
        Self {
            conn_id: Uuid::new_v4(),
            identifier,
            connected_at: Utc::now(),
            sender,
            alive: AtomicBool::new(true),
        }
    }

    /// Send a frame to this connection.
    ///
    /// Returns `false` when the frame could not be handed to the
    /// connection. A full buffer drops the frame (the relay makes no
    /// delivery guarantee); a closed channel marks the handle dead so
    /// subsequent lookups treat the connection as offline.
    pub fn send(&self, frame: String) -> bool {
        if !self.is_alive() {
            return false;
        }
        match self.sender.try_send(frame) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::warn!(
                    conn_id = %self.conn_id,
                    identifier = %self.identifier,
                    "Send buffer full, dropping frame"
                );
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                self.mark_closed();
                false
            }
        }
    }

    /// Check if the connection is, to the router's last knowledge, open.
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Mark the connection as closed.
    pub fn mark_closed(&self) {
        self.alive.store(false, Ordering::SeqCst);
    }
}
