//! WebSocket signaling server implementation.

mod handler;
mod server;
mod signal;
pub mod state;
mod sweeper;

pub use server::Server;
