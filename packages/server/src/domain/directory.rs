//! Identity Directory: participant id ⇔ connection handle.

use std::collections::HashMap;

use super::{ConnectionId, ParticipantId};

/// Bidirectional mapping kept symmetric.
///
/// A participant id maps to at most one handle and a handle to at most one
/// participant id; rebinding either side drops the stale reverse entry.
#[derive(Debug, Default, Clone)]
pub struct IdentityDirectory {
    by_participant: HashMap<ParticipantId, ConnectionId>,
    by_connection: HashMap<ConnectionId, ParticipantId>,
}

impl IdentityDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `participant` to `handle`, replacing any previous binding of either.
    pub fn bind(&mut self, participant: ParticipantId, handle: ConnectionId) {
        if let Some(previous_handle) = self
            .by_participant
            .insert(participant.clone(), handle.clone())
            && previous_handle != handle
        {
            self.by_connection.remove(&previous_handle);
        }

        if let Some(previous_participant) = self.by_connection.insert(handle.clone(), participant.clone())
            && previous_participant != participant
            && self.by_participant.get(&previous_participant) == Some(&handle)
        {
            self.by_participant.remove(&previous_participant);
        }
    }

    pub fn resolve_handle(&self, participant: &ParticipantId) -> Option<&ConnectionId> {
        self.by_participant.get(participant)
    }

    pub fn resolve_identifier(&self, handle: &ConnectionId) -> Option<&ParticipantId> {
        self.by_connection.get(handle)
    }

    /// Remove both directions for `handle`. No-op if the handle is unknown.
    pub fn unbind(&mut self, handle: &ConnectionId) -> Option<ParticipantId> {
        let participant = self.by_connection.remove(handle)?;
        if self.by_participant.get(&participant) == Some(handle) {
            self.by_participant.remove(&participant);
        }
        Some(participant)
    }

    pub fn len(&self) -> usize {
        self.by_connection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_connection.is_empty()
    }
}
