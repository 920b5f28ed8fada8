//! Duet signaling server library.
//!
//! Pairs two participants in a meeting room and relays their WebRTC session
//! negotiation (offer / answer / ICE candidates) over WebSocket. Media never
//! passes through the server.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
