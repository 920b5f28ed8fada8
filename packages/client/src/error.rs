//! Error types for the terminal peer.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The server refused the join-room request
    #[error("Join refused: {0}")]
    JoinRejected(String),

    /// The server closed the room
    #[error("Room closed: {0}")]
    RoomClosed(String),

    /// An outgoing event could not be encoded
    #[error("Failed to encode event: {0}")]
    EncodeError(String),

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),
}
