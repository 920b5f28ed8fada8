//! UseCase error types.

use thiserror::Error;

use crate::domain::RoomError;

/// Errors of the join-room use case
#[derive(Debug, Error)]
pub enum JoinRoomError {
    /// Missing or invalid room / participant id. Dropped without a reply.
    #[error("Invalid join payload: {0}")]
    InvalidPayload(String),

    /// Refused by the room; the requester got a `join-error`.
    #[error(transparent)]
    Rejected(#[from] RoomError),

    #[error("Failed to encode event: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors of the relay use case. All are dropped silently towards the sender.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Invalid relay target '{0}'")]
    InvalidTarget(String),

    #[error("Relay target '{0}' is not connected")]
    TargetNotConnected(String),

    #[error("Failed to encode event: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors of the room detail query
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetRoomDetailError {
    #[error("Room not found")]
    RoomNotFound,
}
