//! Conversion logic between DTOs and domain entities.

use duet_shared::time::timestamp_to_rfc3339;

use crate::{
    domain::{CloseReason, ConnectionId, MemberSnapshot, Room, RoomError, RoomSnapshot, Signal},
    infrastructure::dto::{
        http::{MemberDetailDto, RoomDetailDto, RoomSummaryDto},
        websocket::{ClientEvent, ServerEvent},
    },
};

// ========================================
// Domain → DTO
// ========================================

impl From<&Room> for RoomSummaryDto {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id.as_str().to_string(),
            host: room.host.as_str().to_string(),
            status: room.status.to_string(),
            members: room
                .members()
                .into_iter()
                .map(ConnectionId::into_string)
                .collect(),
            expires_at: timestamp_to_rfc3339(room.expires_at.value()),
        }
    }
}

impl From<MemberSnapshot> for MemberDetailDto {
    fn from(member: MemberSnapshot) -> Self {
        Self {
            socket_id: member.handle.into_string(),
            email_id: member.participant.map(|p| p.into_string()),
        }
    }
}

impl From<RoomSnapshot> for RoomDetailDto {
    fn from(snapshot: RoomSnapshot) -> Self {
        let RoomSnapshot { room, members } = snapshot;
        Self {
            id: room.id.as_str().to_string(),
            host: room.host.as_str().to_string(),
            status: room.status.to_string(),
            members: members.into_iter().map(MemberDetailDto::from).collect(),
            created_at: timestamp_to_rfc3339(room.created_at.value()),
            expires_at: timestamp_to_rfc3339(room.expires_at.value()),
            host_grace_deadline: room
                .host_grace_deadline
                .map(|deadline| timestamp_to_rfc3339(deadline.value())),
        }
    }
}

impl From<RoomError> for ServerEvent {
    fn from(error: RoomError) -> Self {
        ServerEvent::JoinError {
            message: error.to_string(),
        }
    }
}

impl From<CloseReason> for ServerEvent {
    fn from(reason: CloseReason) -> Self {
        ServerEvent::RoomClosed {
            reason: reason.message().to_string(),
        }
    }
}

impl ServerEvent {
    /// Outbound form of a relayed signal, annotated with its sender.
    pub fn relayed(from: &ConnectionId, signal: Signal) -> Self {
        let from = from.as_str().to_string();
        match signal {
            Signal::Offer(offer) => ServerEvent::Offer { from, offer },
            Signal::Answer(answer) => ServerEvent::Answer { from, answer },
            Signal::IceCandidate(candidate) => ServerEvent::IceCandidate { from, candidate },
        }
    }
}

// ========================================
// DTO → Domain
// ========================================

impl ClientEvent {
    /// Split a relay event into its target and signal. `None` for `join-room`.
    pub fn into_signal(self) -> Option<(String, Signal)> {
        match self {
            ClientEvent::JoinRoom { .. } => None,
            ClientEvent::Offer { to, offer } => Some((to, Signal::Offer(offer))),
            ClientEvent::Answer { to, answer } => Some((to, Signal::Answer(answer))),
            ClientEvent::IceCandidate { to, candidate } => {
                Some((to, Signal::IceCandidate(candidate)))
            }
        }
    }
}
