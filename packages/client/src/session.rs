//! WebSocket client session management.

use std::sync::Arc;

use duet_server::infrastructure::dto::websocket::{ClientEvent, ServerEvent};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::{Mutex, mpsc};
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use crate::{
    command::{Command, parse_command},
    domain::{PeerTracker, session_end},
    error::ClientError,
    formatter::EventFormatter,
};

use super::ui::{prompt_for, redisplay_prompt};

/// Run one WebSocket client session
///
/// Sends `join-room` right after connecting, then prints server events and
/// forwards prompt commands until the server ends the session, the
/// connection drops, or the user quits.
///
/// # Returns
///
/// * `Ok(())` - The user quit
/// * `Err(ClientError)` - The server ended the session or the connection failed
pub async fn run_client_session(
    url: &str,
    room_id: &str,
    email_id: &str,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
    tracker: Arc<Mutex<PeerTracker>>,
) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(url)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    tracing::info!("Connected to signaling server!");
    println!(
        "\nYou are '{}' in room '{}'. Commands: offer|answer|candidate [@<socketId>] <json>, peer, quit\n",
        email_id, room_id
    );

    let (mut write, mut read) = ws_stream.split();

    // Join (or rejoin) the room before anything else
    let join = ClientEvent::JoinRoom {
        room_id: Some(room_id.to_string()),
        email_id: Some(email_id.to_string()),
    };
    let join_json =
        serde_json::to_string(&join).map_err(|e| ClientError::EncodeError(e.to_string()))?;
    write
        .send(Message::text(join_json))
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    let prompt = prompt_for(email_id, room_id);

    // Spawn a task to handle incoming events
    let me = email_id.to_string();
    let prompt_for_read = prompt.clone();
    let tracker_for_read = tracker.clone();
    let mut read_task = tokio::spawn(async move {
        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    let event = match serde_json::from_str::<ServerEvent>(text.as_str()) {
                        Ok(event) => event,
                        Err(_) => {
                            print!("{}", EventFormatter::format_raw_message(text.as_str()));
                            redisplay_prompt(&prompt_for_read);
                            continue;
                        }
                    };

                    tracker_for_read.lock().await.observe(&event);
                    print!("{}", EventFormatter::format_event(&event, &me));

                    if let Some(end) = session_end(&event) {
                        return Err(end);
                    }
                    redisplay_prompt(&prompt_for_read);
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    return Err(ClientError::ConnectionError(
                        "Server closed the connection".to_string(),
                    ));
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    return Err(ClientError::ConnectionError(e.to_string()));
                }
                _ => {}
            }
        }

        Err(ClientError::ConnectionError("Connection lost".to_string()))
    });

    loop {
        tokio::select! {
            read_result = &mut read_task => {
                return read_result
                    .unwrap_or_else(|e| Err(ClientError::ConnectionError(e.to_string())));
            }
            line = input_rx.recv() => {
                // Prompt closed (Ctrl+C / Ctrl+D)
                let Some(line) = line else {
                    read_task.abort();
                    let _ = write.close().await;
                    return Ok(());
                };

                let command = match parse_command(&line) {
                    Ok(command) => command,
                    Err(e) => {
                        println!("! {}", e);
                        redisplay_prompt(&prompt);
                        continue;
                    }
                };

                match command {
                    Command::Quit => {
                        read_task.abort();
                        let _ = write.close().await;
                        return Ok(());
                    }
                    Command::Peer => {
                        print!("{}", EventFormatter::format_peer(tracker.lock().await.peer()));
                    }
                    Command::Signal { kind, target, payload } => {
                        let Some(to) = tracker.lock().await.resolve(target.as_deref()) else {
                            println!("! No peer known yet, address one with @<socketId>");
                            redisplay_prompt(&prompt);
                            continue;
                        };
                        let event = kind.into_event(to.clone(), payload);
                        let json = match serde_json::to_string(&event) {
                            Ok(json) => json,
                            Err(e) => {
                                tracing::error!("Failed to serialize {}: {}", kind.as_str(), e);
                                continue;
                            }
                        };
                        if let Err(e) = write.send(Message::text(json)).await {
                            tracing::warn!("Failed to send {}: {}", kind.as_str(), e);
                            read_task.abort();
                            return Err(ClientError::ConnectionError(e.to_string()));
                        }
                        print!("{}", EventFormatter::format_sent_confirmation(kind.as_str(), &to));
                    }
                }
                redisplay_prompt(&prompt);
            }
        }
    }
}
