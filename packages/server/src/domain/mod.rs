//! Domain layer: rooms, identities, and the seams the use cases depend on.

pub mod directory;
pub mod entity;
pub mod error;
pub mod message_pusher;
pub mod registry;
pub mod repository;
pub mod session;
pub mod signal;
pub mod value_object;

pub use directory::IdentityDirectory;
pub use entity::{
    Admission, CloseReason, HOST_GRACE_PERIOD_SECS, MEETING_DURATION_SECS, ROOM_CAPACITY, Room,
    RoomStatus,
};
pub use error::{MessagePushError, RepositoryError, RoomError, ValueObjectError};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use registry::RoomRegistry;
pub use repository::SessionRepository;
pub use session::{ClosedRoom, Departure, JoinOutcome, MemberSnapshot, RoomSnapshot, SessionState};
pub use signal::Signal;
pub use value_object::{ConnectionId, ConnectionIdFactory, ParticipantId, RoomId, Timestamp};

#[cfg(test)]
pub use message_pusher::MockMessagePusher;
