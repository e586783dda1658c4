//! WebSocket upgrade handler.

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{RawQuery, State, WebSocketUpgrade};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use tracing::{info, warn};

use relay_session::identity;

use crate::state::AppState;

/// GET /ws?userId={id} — WebSocket upgrade.
///
/// The identifier is extracted from the raw query string rather than a
/// deserialized parameter map: duplicate or missing `userId` tokens must
/// follow the first-match extraction rules exactly, and a missing
/// identifier falls back to "anonymous" instead of rejecting the
/// upgrade.
pub async fn ws_upgrade(
    State(state): State<AppState>,
    ws: WebSocketUpgrade,
    RawQuery(query): RawQuery,
) -> Response {
    let identifier = identity::extract_identifier(query.as_deref());
    ws.on_upgrade(move |socket| handle_ws_connection(state, identifier, socket))
}

/// Runs one established WebSocket connection until it closes.
async fn handle_ws_connection(state: AppState, identifier: String, socket: WebSocket) {
    let (mut ws_tx, mut ws_rx) = socket.split();

    let (handle, mut outbound_rx) = state.sessions.register(&identifier);
    let conn_id = handle.conn_id;

    // Forward routed frames out to the client.
    let outbound_task = tokio::spawn(async move {
        while let Some(frame) = outbound_rx.recv().await {
            if ws_tx.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    });

    // Pump inbound frames through the session router.
    while let Some(result) = ws_rx.next().await {
        match result {
            Ok(Message::Text(text)) => {
                state.sessions.route(&handle, text.as_str());
            }
            Ok(Message::Close(_)) => {
                break;
            }
            // Ping/pong and binary frames are not part of the protocol.
            Ok(_) => {}
            Err(e) => {
                warn!(conn_id = %conn_id, error = %e, "WebSocket error");
                break;
            }
        }
    }

    outbound_task.abort();
    state.sessions.unregister(&handle.identifier);

    info!(conn_id = %conn_id, identifier = %handle.identifier, "WebSocket connection closed");
}
