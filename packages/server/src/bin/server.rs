//! Duet signaling server.
//!
//! Pairs two participants per room and relays their WebRTC negotiation.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin duet-server
//! cargo run --bin duet-server -- --host 0.0.0.0 --port 3000
//! ```

use std::{sync::Arc, time::Duration};

use clap::Parser;
use duet_server::ui::Server;
use duet_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "duet-server")]
#[command(about = "WebRTC signaling relay for two-participant meeting rooms", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Seconds between two lifecycle sweeps
    #[arg(long, default_value = "1", value_parser = clap::value_parser!(u64).range(1..=5))]
    sweep_interval_secs: u64,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    let server = Server::in_memory(
        Arc::new(SystemClock),
        Duration::from_secs(args.sweep_interval_secs),
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
