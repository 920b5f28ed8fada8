//! Room エンティティと状態遷移
//!
//! ## 状態
//!
//! - `Active`: 参加可能。1 時間の上限とホスト不在の猶予期間で `Expired` に遷移する
//! - `Expired`: 終了済み。ホスト本人の再参加でのみ `Active` に戻る
//!
//! Room は削除されません。終了済みの Room も参照可能なまま残り、
//! ホストの再開や「終了済み」エラーの判定に使われます。

use std::{collections::BTreeSet, fmt};

use super::{ConnectionId, ParticipantId, RoomError, RoomId, Timestamp};

/// Hard lifetime of an active (or reactivated) room.
pub const MEETING_DURATION_SECS: i64 = 3600;

/// How long a room waits for its host after the host's connection leaves.
pub const HOST_GRACE_PERIOD_SECS: i64 = 30;

/// Maximum number of connections in an active room.
pub const ROOM_CAPACITY: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomStatus {
    Active,
    Expired,
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoomStatus::Active => f.write_str("active"),
            RoomStatus::Expired => f.write_str("expired"),
        }
    }
}

/// Why the sweeper closed a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    TimeLimit,
    HostLeft,
}

impl CloseReason {
    /// Human-readable reason sent with `room-closed`.
    pub fn message(&self) -> &'static str {
        match self {
            CloseReason::TimeLimit => "Meeting has reached the 1-hour limit.",
            CloseReason::HostLeft => "Host has left the meeting.",
        }
    }
}

/// How an accepted join changed the room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The join created the room.
    Created,
    /// A new connection was added to an active room.
    Joined,
    /// The connection was already a member; nothing but the host grace deadline changed.
    AlreadyMember,
    /// The host brought an expired room back to life.
    Reactivated,
}

/// A named, time-bounded pairing slot for two participants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: RoomId,
    pub host: ParticipantId,
    pub status: RoomStatus,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
    pub host_grace_deadline: Option<Timestamp>,
    members: BTreeSet<ConnectionId>,
}

impl Room {
    /// Create a room on its first join; the joiner becomes host and sole member.
    pub fn create(id: RoomId, host: ParticipantId, handle: ConnectionId, now: Timestamp) -> Self {
        Self {
            id,
            host,
            status: RoomStatus::Active,
            created_at: now,
            expires_at: now.plus_secs(MEETING_DURATION_SECS),
            host_grace_deadline: None,
            members: BTreeSet::from([handle]),
        }
    }

    pub fn is_host(&self, participant: &ParticipantId) -> bool {
        &self.host == participant
    }

    pub fn is_active(&self) -> bool {
        self.status == RoomStatus::Active
    }

    pub fn contains(&self, handle: &ConnectionId) -> bool {
        self.members.contains(handle)
    }

    /// Current members in a stable order.
    pub fn members(&self) -> Vec<ConnectionId> {
        self.members.iter().cloned().collect()
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Apply a join request to an existing room.
    ///
    /// A rejected join leaves the room untouched.
    pub fn admit(
        &mut self,
        participant: &ParticipantId,
        handle: ConnectionId,
        now: Timestamp,
    ) -> Result<Admission, RoomError> {
        match self.status {
            RoomStatus::Expired if self.is_host(participant) => {
                self.status = RoomStatus::Active;
                self.expires_at = now.plus_secs(MEETING_DURATION_SECS);
                self.host_grace_deadline = None;
                // Connections still in the room stay members. Only a full room
                // falls back to the host's handle alone.
                if !self.members.contains(&handle) && self.members.len() >= ROOM_CAPACITY {
                    self.members.clear();
                }
                self.members.insert(handle);
                Ok(Admission::Reactivated)
            }
            RoomStatus::Expired => Err(RoomError::MeetingExpired),
            RoomStatus::Active => {
                let already_member = self.members.contains(&handle);
                if !already_member && self.members.len() >= ROOM_CAPACITY {
                    return Err(RoomError::RoomFull);
                }
                if self.is_host(participant) {
                    self.host_grace_deadline = None;
                }
                if already_member {
                    Ok(Admission::AlreadyMember)
                } else {
                    self.members.insert(handle);
                    Ok(Admission::Joined)
                }
            }
        }
    }

    /// Remove a departing connection.
    ///
    /// `departing` is the participant the connection was bound to, if any. When it is
    /// the host, the grace period starts. Returns `false` if the handle was not a member.
    pub fn remove_member(
        &mut self,
        handle: &ConnectionId,
        departing: Option<&ParticipantId>,
        now: Timestamp,
    ) -> bool {
        if !self.members.remove(handle) {
            return false;
        }
        if departing.is_some_and(|participant| self.is_host(participant)) {
            self.host_grace_deadline = Some(now.plus_secs(HOST_GRACE_PERIOD_SECS));
        }
        true
    }

    /// Check both deadlines and expire the room if one has passed.
    ///
    /// The hard limit is checked first so it wins when both have elapsed.
    pub fn close_if_due(&mut self, now: Timestamp) -> Option<CloseReason> {
        if !self.is_active() {
            return None;
        }

        let reason = if now >= self.expires_at {
            CloseReason::TimeLimit
        } else if self
            .host_grace_deadline
            .is_some_and(|deadline| now >= deadline)
        {
            CloseReason::HostLeft
        } else {
            return None;
        };

        self.status = RoomStatus::Expired;
        Some(reason)
    }
}
