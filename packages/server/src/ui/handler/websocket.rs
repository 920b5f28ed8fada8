//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::ConnectionId,
    infrastructure::dto::websocket::ClientEvent,
    ui::state::AppState,
    usecase::JoinRoomError,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// This function handles the outbound message flow: events addressed to this connection
/// (via rx channel) are written to its WebSocket.
///
/// # Arguments
///
/// * `rx` - Channel receiver for events addressed to this connection
/// * `sender` - WebSocket sink to send messages to this client
///
/// # Returns
///
/// A `JoinHandle` for the spawned task
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (sender, mut receiver) = socket.split();

    // Create a channel for this connection to receive events
    let (tx, rx) = mpsc::unbounded_channel();

    // Issue the connection handle (register_client is called inside the UseCase)
    let handle = state.connect_participant_usecase.execute(tx).await;

    let state_clone = state.clone();
    let handle_clone = handle.clone();

    // Spawn a task to receive events from this client
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", handle_clone, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    let event = match serde_json::from_str::<ClientEvent>(&text) {
                        Ok(event) => event,
                        Err(e) => {
                            tracing::warn!(
                                "Dropping undecodable frame from '{}': {}",
                                handle_clone,
                                e
                            );
                            continue;
                        }
                    };
                    dispatch(&state_clone, &handle_clone, event).await;
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", handle_clone);
                    break;
                }
                _ => {}
            }
        }
    });

    // Spawn a task to write events addressed to this connection
    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    state
        .disconnect_participant_usecase
        .execute(&handle)
        .await;
}

/// Route one decoded client event to its use case
async fn dispatch(state: &AppState, handle: &ConnectionId, event: ClientEvent) {
    match event {
        ClientEvent::JoinRoom { room_id, email_id } => {
            // 拒否時の join-error 送信は UseCase 内で行われる
            match state
                .join_room_usecase
                .execute(handle, room_id, email_id)
                .await
            {
                Ok(_) | Err(JoinRoomError::Rejected(_)) => {}
                Err(JoinRoomError::InvalidPayload(reason)) => {
                    tracing::warn!("Ignoring join-room from '{}': {}", handle, reason);
                }
                Err(e) => {
                    tracing::error!("join-room from '{}' failed: {}", handle, e);
                }
            }
        }
        relayable => {
            let Some((to, signal)) = relayable.into_signal() else {
                return;
            };
            let kind = signal.kind();
            if let Err(e) = state.relay_signal_usecase.execute(handle, to, signal).await {
                tracing::warn!("Dropped {} from '{}': {}", kind, handle, e);
            }
        }
    }
}
