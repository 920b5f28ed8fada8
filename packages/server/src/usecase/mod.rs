//! UseCase layer: one use case per inbound event, plus the sweep and read-only queries.

pub mod connect_participant;
pub mod disconnect_participant;
pub mod error;
pub mod get_room_detail;
pub mod get_rooms;
pub mod join_room;
pub mod relay_signal;
pub mod sweep_rooms;

pub use connect_participant::ConnectParticipantUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::{GetRoomDetailError, JoinRoomError, RelayError};
pub use get_room_detail::GetRoomDetailUseCase;
pub use get_rooms::GetRoomsUseCase;
pub use join_room::JoinRoomUseCase;
pub use relay_signal::RelaySignalUseCase;
pub use sweep_rooms::SweepRoomsUseCase;
