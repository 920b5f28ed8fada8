//! Client execution logic with reconnection support.

use std::{sync::Arc, time::Duration};

use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::{Mutex, mpsc};

use super::{
    domain::{PeerTracker, should_attempt_reconnect, should_exit_immediately},
    error::ClientError,
    session::run_client_session,
    ui::prompt_for,
};

const MAX_RECONNECT_ATTEMPTS: u32 = 5;
const RECONNECT_INTERVAL_SECS: u64 = 5;

/// Spawn a blocking thread for rustyline (synchronous readline)
///
/// The thread outlives individual sessions so reconnecting does not stack
/// up prompts. The channel closes on Ctrl+C or Ctrl+D.
fn spawn_readline(prompt: String) -> mpsc::UnboundedReceiver<String> {
    let (input_tx, input_rx) = mpsc::unbounded_channel::<String>();

    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            // Channel closed, exit thread
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    input_rx
}

/// Run the terminal peer with reconnection logic
///
/// A room that closes ends the client normally. A refused join is returned
/// as an error, as is a connection that cannot be restored.
pub async fn run_client(url: String, room_id: String, email_id: String) -> Result<(), ClientError> {
    let mut input_rx = spawn_readline(prompt_for(&email_id, &room_id));
    let tracker = Arc::new(Mutex::new(PeerTracker::new()));
    let mut reconnect_count = 0;

    loop {
        tracing::info!(
            "Attempting to connect to {} as '{}' for room '{}' (attempt {}/{})",
            url,
            email_id,
            room_id,
            reconnect_count + 1,
            MAX_RECONNECT_ATTEMPTS
        );

        let error = match run_client_session(
            &url,
            &room_id,
            &email_id,
            &mut input_rx,
            tracker.clone(),
        )
        .await
        {
            Ok(()) => {
                tracing::info!("Client session ended normally");
                return Ok(());
            }
            Err(e) => e,
        };

        if should_exit_immediately(&error) {
            return match error {
                ClientError::RoomClosed(reason) => {
                    tracing::info!("Room '{}' closed: {}", room_id, reason);
                    Ok(())
                }
                other => Err(other),
            };
        }

        tracing::warn!("Connection lost: {}", error);
        reconnect_count += 1;

        if !should_attempt_reconnect(&error, reconnect_count, MAX_RECONNECT_ATTEMPTS) {
            tracing::error!(
                "Failed to reconnect after {} attempts. Exiting.",
                MAX_RECONNECT_ATTEMPTS
            );
            return Err(error);
        }

        tracing::info!(
            "Reconnecting in {} seconds... (attempt {}/{})",
            RECONNECT_INTERVAL_SECS,
            reconnect_count + 1,
            MAX_RECONNECT_ATTEMPTS
        );

        tokio::time::sleep(Duration::from_secs(RECONNECT_INTERVAL_SECS)).await;
    }
}
