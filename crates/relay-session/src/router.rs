//! Session router — connection lifecycle and frame routing.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use relay_core::config::relay::RelayConfig;

use crate::frame::{Inbound, Outbound};
use crate::handle::ConnectionHandle;
use crate::registry::SessionRegistry;

/// Routes frames between registered connections.
///
/// One router instance lives for the whole process. Every connection
/// task calls into it concurrently; the registry is the only shared
/// state, and no multi-step transaction spans it.
#[derive(Debug)]
pub struct SessionRouter {
    registry: SessionRegistry,
    config: RelayConfig,
}

impl SessionRouter {
    /// Creates a new session router.
    pub fn new(config: RelayConfig) -> Self {
        Self {
            registry: SessionRegistry::new(),
            config,
        }
    }

    /// Registers a connection under an identifier.
    ///
    /// Returns the connection handle and the receiver for its outbound
    /// frames. A duplicate identifier silently replaces the earlier
    /// mapping without closing the earlier connection; the displaced
    /// connection stays functional as a sender but is unreachable as a
    /// recipient.
    pub fn register(&self, identifier: &str) -> (Arc<ConnectionHandle>, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(self.config.channel_buffer_size);
        let handle = Arc::new(ConnectionHandle::new(identifier.to_string(), tx));

        if let Some(displaced) = self.registry.insert(handle.clone()) {
            warn!(
                identifier = %identifier,
                old_conn_id = %displaced.conn_id,
                new_conn_id = %handle.conn_id,
                "Duplicate identifier, earlier connection displaced from registry"
            );
        }

        info!(
            conn_id = %handle.conn_id,
            identifier = %identifier,
            online = ?self.registry.roster(),
            "User connected"
        );

        (handle, rx)
    }

    /// Unregisters an identifier on connection close.
    ///
    /// Removal is unconditional on the identifier, with no check that
    /// the stored entry still belongs to the closing connection: under
    /// the duplicate-identifier overwrite above, a stale disconnect can
    /// evict the newer connection's entry. Known race, kept as the
    /// documented behavior.
    pub fn unregister(&self, identifier: &str) {
        if let Some(handle) = self.registry.remove(identifier) {
            handle.mark_closed();
        }

        info!(
            identifier = %identifier,
            online = ?self.registry.roster(),
            "User disconnected"
        );
    }

    /// Routes one inbound frame from a connected sender.
    ///
    /// Parses `recipientId:content`, then either delivers
    /// `From {sender}: {content}` to the recipient's connection or
    /// replies to the sender alone with an offline or invalid-format
    /// notice. Delivery is attempted synchronously within this call; no
    /// queueing beyond the recipient's outbound buffer, no retry, and no
    /// acknowledgement to the sender on success.
    pub fn route(&self, sender: &ConnectionHandle, payload: &str) {
        let Some(frame) = Inbound::parse(payload) else {
            sender.send(Outbound::InvalidFormat.to_string());
            return;
        };

        match self.registry.get(frame.recipient) {
            Some(recipient) if recipient.is_alive() => {
                let delivered = recipient.send(
                    Outbound::Delivery {
                        sender: &sender.identifier,
                        content: frame.content,
                    }
                    .to_string(),
                );
                if delivered {
                    debug!(
                        from = %sender.identifier,
                        to = %frame.recipient,
                        "Frame routed"
                    );
                } else {
                    // Transport-level write failure; the recipient is
                    // unreachable until its close notification lands.
                    warn!(
                        from = %sender.identifier,
                        to = %frame.recipient,
                        "Delivery failed, recipient channel unavailable"
                    );
                }
            }
            _ => {
                sender.send(
                    Outbound::Offline {
                        recipient: frame.recipient,
                    }
                    .to_string(),
                );
            }
        }
    }

    /// Returns the number of registered connections.
    pub fn connection_count(&self) -> usize {
        self.registry.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::Receiver;
    use tokio::time::{Duration, timeout};

    fn router() -> SessionRouter {
        SessionRouter::new(RelayConfig::default())
    }

    async fn recv(rx: &mut Receiver<String>) -> String {
        timeout(Duration::from_millis(100), rx.recv())
            .await
            .expect("frame expected")
            .expect("channel open")
    }

    async fn assert_silent(rx: &mut Receiver<String>) {
        assert!(
            timeout(Duration::from_millis(50), rx.recv()).await.is_err(),
            "expected no frame"
        );
    }

    #[tokio::test]
    async fn test_direct_delivery() {
        let router = router();
        let (alice, mut alice_rx) = router.register("alice");
        let (_bob, mut bob_rx) = router.register("bob");

        router.route(&alice, "bob:hello");

        assert_eq!(recv(&mut bob_rx).await, "From alice: hello");
        // Silence signals success: no ack back to the sender.
        assert_silent(&mut alice_rx).await;
    }

    #[tokio::test]
    async fn test_malformed_frame_notifies_sender_only() {
        let router = router();
        let (alice, mut alice_rx) = router.register("alice");
        let (_bob, mut bob_rx) = router.register("bob");

        router.route(&alice, "hello");

        assert_eq!(
            recv(&mut alice_rx).await,
            "Invalid format. Use receiverId:message"
        );
        assert_silent(&mut bob_rx).await;
    }

    #[tokio::test]
    async fn test_unknown_recipient_is_offline() {
        let router = router();
        let (alice, mut alice_rx) = router.register("alice");

        router.route(&alice, "ghost:hi");

        assert_eq!(recv(&mut alice_rx).await, "User ghost is offline");
    }

    #[tokio::test]
    async fn test_recipient_offline_after_disconnect() {
        let router = router();
        let (alice, mut alice_rx) = router.register("alice");
        let (_bob, mut bob_rx) = router.register("bob");

        router.route(&alice, "bob:first");
        assert_eq!(recv(&mut bob_rx).await, "From alice: first");

        router.unregister("bob");
        router.route(&alice, "bob:second");
        assert_eq!(recv(&mut alice_rx).await, "User bob is offline");
    }

    #[tokio::test]
    async fn test_content_keeps_further_colons() {
        let router = router();
        let (alice, _alice_rx) = router.register("alice");
        let (_bob, mut bob_rx) = router.register("bob");

        router.route(&alice, "bob:10:30 meeting");

        assert_eq!(recv(&mut bob_rx).await, "From alice: 10:30 meeting");
    }

    #[tokio::test]
    async fn test_duplicate_identifier_routes_to_newest() {
        let router = router();
        let (_first, mut first_rx) = router.register("dave");
        let (_second, mut second_rx) = router.register("dave");
        let (eve, _eve_rx) = router.register("eve");

        router.route(&eve, "dave:hi");

        assert_eq!(recv(&mut second_rx).await, "From eve: hi");
        assert_silent(&mut first_rx).await;
    }

    #[tokio::test]
    async fn test_displaced_connection_still_sends() {
        let router = router();
        let (first, _first_rx) = router.register("dave");
        let (_second, _second_rx) = router.register("dave");
        let (_eve, mut eve_rx) = router.register("eve");

        // The displaced connection is unreachable as a recipient but
        // remains functional as a sender.
        router.route(&first, "eve:still here");

        assert_eq!(recv(&mut eve_rx).await, "From dave: still here");
    }

    #[tokio::test]
    async fn test_unregister_is_unconditional_on_identifier() {
        let router = router();
        let (_first, _first_rx) = router.register("dave");
        let (_second, _second_rx) = router.register("dave");

        // A stale disconnect from the displaced connection evicts the
        // newer connection's entry. Documented race, preserved.
        router.unregister("dave");

        assert_eq!(router.connection_count(), 0);
    }

    #[tokio::test]
    async fn test_dead_recipient_entry_reports_offline() {
        let router = router();
        let (alice, mut alice_rx) = router.register("alice");
        let (bob, _bob_rx) = router.register("bob");

        // Still registered, but the connection is no longer open.
        bob.mark_closed();
        router.route(&alice, "bob:hi");

        assert_eq!(recv(&mut alice_rx).await, "User bob is offline");
    }

    #[tokio::test]
    async fn test_concurrent_senders_deliver_intact_frames() {
        const SENDERS: usize = 16;

        let router = Arc::new(SessionRouter::new(RelayConfig {
            channel_buffer_size: SENDERS,
        }));
        let (_hub, mut hub_rx) = router.register("hub");

        let mut tasks = Vec::new();
        for i in 0..SENDERS {
            let router = Arc::clone(&router);
            tasks.push(tokio::spawn(async move {
                let (sender, _rx) = router.register(&format!("sender-{i}"));
                router.route(&sender, &format!("hub:payload-{i}"));
            }));
        }
        for task in tasks {
            task.await.expect("sender task");
        }

        let mut received = Vec::new();
        for _ in 0..SENDERS {
            received.push(recv(&mut hub_rx).await);
        }
        received.sort();

        let mut expected: Vec<String> = (0..SENDERS)
            .map(|i| format!("From sender-{i}: payload-{i}"))
            .collect();
        expected.sort();

        // Order across senders is unspecified; every frame arrives whole.
        assert_eq!(received, expected);
    }
}
