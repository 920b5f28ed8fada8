//! WebSocket event DTOs.
//!
//! Every frame is a JSON object tagged with its event name:
//!
//! ```text
//! {"type": "join-room", "roomId": "R1", "emailId": "alice@example.com"}
//! {"type": "offer", "to": "<socketId>", "offer": {...}}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Client → server events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientEvent {
    /// Fields are optional on the wire so a partial payload can be diagnosed
    /// instead of failing to decode.
    #[serde(rename_all = "camelCase")]
    JoinRoom {
        #[serde(default)]
        room_id: Option<String>,
        #[serde(default)]
        email_id: Option<String>,
    },
    Offer {
        to: String,
        offer: Value,
    },
    Answer {
        to: String,
        answer: Value,
    },
    IceCandidate {
        to: String,
        candidate: Value,
    },
}

/// Server → client events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerEvent {
    #[serde(rename_all = "camelCase")]
    JoinedRoom { room_id: String },
    JoinError { message: String },
    #[serde(rename_all = "camelCase")]
    UserJoined { email_id: String, socket_id: String },
    Offer { from: String, offer: Value },
    Answer { from: String, answer: Value },
    IceCandidate { from: String, candidate: Value },
    RoomClosed { reason: String },
}

impl ServerEvent {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
