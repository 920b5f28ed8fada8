//! Duet terminal peer.
//!
//! Joins a room on a running signaling server and lets a human drive the
//! offer / answer / ICE candidate exchange from a prompt.

pub mod command;
pub mod domain;
pub mod error;
pub mod formatter;
mod runner;
mod session;
mod ui;

pub use runner::run_client;
