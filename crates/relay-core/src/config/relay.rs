//! Session router configuration.

use serde::{Deserialize, Serialize};

/// Session router (WebSocket relay) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Buffer size of each connection's outbound channel. A recipient
    /// whose buffer is full has further frames dropped; the relay makes
    /// no delivery guarantee.
    #[serde(default = "default_channel_buffer")]
    pub channel_buffer_size: usize,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            channel_buffer_size: default_channel_buffer(),
        }
    }
}

fn default_channel_buffer() -> usize {
    64
}
