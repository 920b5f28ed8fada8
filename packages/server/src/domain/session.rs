//! シグナリングの共有状態
//!
//! Room Registry と Identity Directory を 1 つの集約にまとめたものです。
//! Repository 実装はこの集約を 1 つのロックで保護し、join / disconnect / sweep の
//! 各操作を直列化します。

use super::{
    Admission, CloseReason, ConnectionId, IdentityDirectory, ParticipantId, Room, RoomError,
    RoomId, RoomRegistry, Timestamp,
};

/// Result of an accepted join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOutcome {
    pub room_id: RoomId,
    pub admission: Admission,
    /// Other members at the moment the join was applied.
    pub peers: Vec<ConnectionId>,
}

/// A room a disconnecting handle was removed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    pub room_id: RoomId,
    /// The departing connection belonged to the host; the grace period started.
    pub host_left: bool,
}

/// A room expired by a sweep, with the members to notify.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosedRoom {
    pub room_id: RoomId,
    pub reason: CloseReason,
    pub members: Vec<ConnectionId>,
}

/// One member of a room with the participant id its handle is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberSnapshot {
    pub handle: ConnectionId,
    pub participant: Option<ParticipantId>,
}

/// Point-in-time copy of a room for read-only callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSnapshot {
    pub room: Room,
    pub members: Vec<MemberSnapshot>,
}

#[derive(Debug, Default, Clone)]
pub struct SessionState {
    rooms: RoomRegistry,
    directory: IdentityDirectory,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rooms(&self) -> &RoomRegistry {
        &self.rooms
    }

    pub fn directory(&self) -> &IdentityDirectory {
        &self.directory
    }

    /// Handle `join-room` from `handle`.
    ///
    /// The participant is bound to the handle only when the join is accepted.
    pub fn join(
        &mut self,
        room_id: RoomId,
        participant: ParticipantId,
        handle: ConnectionId,
        now: Timestamp,
    ) -> Result<JoinOutcome, RoomError> {
        let admission = match self.rooms.get_mut(&room_id) {
            Some(room) => {
                // A host coming back to an expired room on a new connection
                // supersedes the connection it was bound to before.
                if !room.is_active()
                    && room.is_host(&participant)
                    && let Some(previous) = self.directory.resolve_handle(&participant)
                    && previous != &handle
                {
                    room.remove_member(previous, None, now);
                }
                room.admit(&participant, handle.clone(), now)?
            }
            None => {
                self.rooms.insert(Room::create(
                    room_id.clone(),
                    participant.clone(),
                    handle.clone(),
                    now,
                ));
                Admission::Created
            }
        };

        self.directory.bind(participant, handle.clone());

        let peers = self
            .rooms
            .get(&room_id)
            .map(|room| {
                room.members()
                    .into_iter()
                    .filter(|member| member != &handle)
                    .collect()
            })
            .unwrap_or_default();

        Ok(JoinOutcome {
            room_id,
            admission,
            peers,
        })
    }

    /// Handle a transport-level disconnect of `handle`.
    ///
    /// Removes the handle from every room it is in, then from the directory.
    pub fn disconnect(&mut self, handle: &ConnectionId, now: Timestamp) -> Vec<Departure> {
        let departing = self.directory.resolve_identifier(handle).cloned();

        let mut departures: Vec<Departure> = self
            .rooms
            .rooms_with_member_mut(handle)
            .filter_map(|room| {
                room.remove_member(handle, departing.as_ref(), now)
                    .then(|| Departure {
                        room_id: room.id.clone(),
                        host_left: departing
                            .as_ref()
                            .is_some_and(|participant| room.is_host(participant)),
                    })
            })
            .collect();
        departures.sort_by(|a, b| a.room_id.cmp(&b.room_id));

        self.directory.unbind(handle);

        departures
    }

    /// Expire every active room whose hard limit or host grace deadline has passed.
    pub fn sweep(&mut self, now: Timestamp) -> Vec<ClosedRoom> {
        let mut closed: Vec<ClosedRoom> = self
            .rooms
            .iter_mut()
            .filter_map(|room| {
                room.close_if_due(now).map(|reason| ClosedRoom {
                    room_id: room.id.clone(),
                    reason,
                    members: room.members(),
                })
            })
            .collect();
        closed.sort_by(|a, b| a.room_id.cmp(&b.room_id));
        closed
    }

    pub fn snapshot(&self, room_id: &RoomId) -> Option<RoomSnapshot> {
        let room = self.rooms.get(room_id)?;
        let members = room
            .members()
            .into_iter()
            .map(|handle| MemberSnapshot {
                participant: self.directory.resolve_identifier(&handle).cloned(),
                handle,
            })
            .collect();

        Some(RoomSnapshot {
            room: room.clone(),
            members,
        })
    }
}
