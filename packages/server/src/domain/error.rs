//! Domain error types.

use thiserror::Error;

/// Validation errors raised while constructing value objects
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("{kind} must be at most {max} bytes")]
    TooLong { kind: &'static str, max: usize },
}

/// Reasons a join request is refused by an existing room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RoomError {
    /// The room already holds two other connections.
    #[error("This room is full.")]
    RoomFull,

    /// The room has expired and the requester is not its host.
    #[error("This meeting has expired.")]
    MeetingExpired,
}

/// Repository errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("Room '{0}' not found")]
    RoomNotFound(String),
}

/// Errors raised while pushing messages to connections
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("Connection '{0}' is not registered")]
    ClientNotFound(String),

    #[error("Failed to push message: {0}")]
    PushFailed(String),
}
