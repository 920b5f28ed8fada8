//! Room Registry: room id → Room.

use std::collections::HashMap;

use super::{ConnectionId, Room, RoomId};

/// Source of truth for every room ever created in this process.
///
/// Entries are never removed.
#[derive(Debug, Default, Clone)]
pub struct RoomRegistry {
    rooms: HashMap<RoomId, Room>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, room_id: &RoomId) -> Option<&Room> {
        self.rooms.get(room_id)
    }

    pub fn get_mut(&mut self, room_id: &RoomId) -> Option<&mut Room> {
        self.rooms.get_mut(room_id)
    }

    /// Insert a freshly created room. Returns `false` if the id was already taken.
    pub fn insert(&mut self, room: Room) -> bool {
        if self.rooms.contains_key(&room.id) {
            return false;
        }
        self.rooms.insert(room.id.clone(), room);
        true
    }

    /// Rooms whose member set contains `handle`.
    pub fn rooms_with_member_mut<'a>(
        &'a mut self,
        handle: &'a ConnectionId,
    ) -> impl Iterator<Item = &'a mut Room> + 'a {
        self.rooms.values_mut().filter(move |room| room.contains(handle))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Room> {
        self.rooms.values_mut()
    }

    /// All rooms sorted by id.
    pub fn list(&self) -> Vec<&Room> {
        let mut rooms: Vec<&Room> = self.rooms.values().collect();
        rooms.sort_by(|a, b| a.id.cmp(&b.id));
        rooms
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
