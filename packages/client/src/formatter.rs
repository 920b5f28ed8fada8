//! Event formatting utilities for client display.

use chrono::Local;
use duet_server::infrastructure::dto::websocket::ServerEvent;
use serde_json::Value;

/// Event formatter for client display
pub struct EventFormatter;

impl EventFormatter {
    /// Format a server event for the terminal
    ///
    /// # Arguments
    ///
    /// * `event` - The decoded server event
    /// * `me` - This client's own participant id (to mark as "me")
    ///
    /// # Returns
    ///
    /// A formatted string ready to print
    pub fn format_event(event: &ServerEvent, me: &str) -> String {
        match event {
            ServerEvent::JoinedRoom { room_id } => format!(
                "\n\n============================================================\n\
                 Joined room '{}' as {} (me)\n\
                 ============================================================\n",
                room_id, me
            ),
            ServerEvent::JoinError { message } => format!("\n! join refused: {}\n", message),
            ServerEvent::UserJoined { email_id, socket_id } => {
                format!("\n+ {} joined (socket {})\n", email_id, socket_id)
            }
            ServerEvent::Offer { from, offer } => Self::format_signal("offer", from, offer),
            ServerEvent::Answer { from, answer } => Self::format_signal("answer", from, answer),
            ServerEvent::IceCandidate { from, candidate } => {
                Self::format_signal("ice-candidate", from, candidate)
            }
            ServerEvent::RoomClosed { reason } => format!(
                "\n\n------------------------------------------------------------\n\
                 Room closed: {}\n\
                 ------------------------------------------------------------\n",
                reason
            ),
        }
    }

    /// Format a relayed negotiation message
    pub fn format_signal(kind: &str, from: &str, payload: &Value) -> String {
        let body = serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string());
        format!(
            "\n← {} from {} at {}\n{}\n",
            kind,
            from,
            Local::now().format("%H:%M:%S"),
            body
        )
    }

    /// Format a confirmation message after sending
    pub fn format_sent_confirmation(kind: &str, to: &str) -> String {
        format!("→ {} sent to {}\n", kind, to)
    }

    /// Format the remembered peer
    pub fn format_peer(peer: Option<&str>) -> String {
        match peer {
            Some(peer) => format!("peer: {}\n", peer),
            None => "peer: (none yet)\n".to_string(),
        }
    }

    /// Format a raw text message (when parsing fails)
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }
}
