//! Utilities shared by the Duet server and client binaries.

pub mod logger;
pub mod time;
