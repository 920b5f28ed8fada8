//! Domain logic for client-side operations.
//!
//! This module contains pure functions that implement business logic
//! without side effects, making them easy to test.

use duet_server::infrastructure::dto::websocket::ServerEvent;

use crate::error::ClientError;

/// Check if the client should exit immediately based on the error type.
///
/// # Arguments
///
/// * `error` - The client error to check
///
/// # Returns
///
/// `true` if the server ended the session on purpose (join refused or room closed),
/// `false` otherwise
pub fn should_exit_immediately(error: &ClientError) -> bool {
    matches!(
        error,
        ClientError::JoinRejected(_) | ClientError::RoomClosed(_)
    )
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `error` - The client error that occurred
/// * `current_attempt` - The current reconnection attempt count (0-indexed)
/// * `max_attempts` - The maximum number of reconnection attempts allowed
///
/// # Returns
///
/// `true` if reconnection should be attempted, `false` otherwise
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    // Don't reconnect if the error requires immediate exit
    if should_exit_immediately(error) {
        return false;
    }

    // Don't reconnect if we've exhausted all attempts
    current_attempt < max_attempts
}

/// Server events that end the session
pub fn session_end(event: &ServerEvent) -> Option<ClientError> {
    match event {
        ServerEvent::JoinError { message } => Some(ClientError::JoinRejected(message.clone())),
        ServerEvent::RoomClosed { reason } => Some(ClientError::RoomClosed(reason.clone())),
        _ => None,
    }
}

/// Remembers the last peer handle learned from the server
#[derive(Debug, Default, Clone)]
pub struct PeerTracker {
    peer: Option<String>,
}

impl PeerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the remembered peer from an incoming event
    pub fn observe(&mut self, event: &ServerEvent) {
        let learned = match event {
            ServerEvent::UserJoined { socket_id, .. } => socket_id,
            ServerEvent::Offer { from, .. }
            | ServerEvent::Answer { from, .. }
            | ServerEvent::IceCandidate { from, .. } => from,
            _ => return,
        };
        self.peer = Some(learned.clone());
    }

    pub fn peer(&self) -> Option<&str> {
        self.peer.as_deref()
    }

    /// Pick the explicit target if given, otherwise the remembered peer
    pub fn resolve(&self, explicit: Option<&str>) -> Option<String> {
        explicit.or(self.peer()).map(str::to_string)
    }
}
