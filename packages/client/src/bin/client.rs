//! Duet terminal peer with reconnection support.
//!
//! Joins a meeting room on a Duet signaling server and relays offer / answer /
//! ICE candidate payloads typed at the prompt to the other participant.
//! Automatically reconnects on disconnection (max 5 attempts with 5 second interval),
//! re-sending join-room so a host can come back within the grace period.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin duet-client -- --room R1 --email alice@example.com
//! cargo run --bin duet-client -- -r R1 -e bob@example.com
//! ```

use clap::Parser;

use duet_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "duet-client")]
#[command(about = "Terminal peer for the Duet signaling relay", long_about = None)]
struct Args {
    /// Room to join (created if it does not exist, with you as host)
    #[arg(short = 'r', long)]
    room: String,

    /// Participant identifier announced to the other side
    #[arg(short = 'e', long)]
    email: String,

    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8080/ws")]
    url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    // Run the client
    if let Err(e) = duet_client::run_client(args.url, args.room, args.email).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
