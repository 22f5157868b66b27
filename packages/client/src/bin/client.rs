//! Command-line watch-party viewer.
//!
//! Joins a room on a Syncwatch server, prints every playback `sync` and sends
//! `video` / `play` / `pause` / `seek` commands typed at the prompt.
//! Automatically reconnects on disconnection (max 5 attempts with 1 second interval).
//! An invalid room id or a rejected origin is not retried.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin syncwatch-client -- --room movie-night
//! cargo run --bin syncwatch-client -- -r movie-night -u ws://example.com:8080/ws
//! ```

use clap::Parser;
use syncwatch_client::runner::run_client;
use syncwatch_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "syncwatch-client")]
#[command(about = "Watch-party viewer that follows a Syncwatch room", long_about = None)]
struct Args {
    /// Room to join
    #[arg(short = 'r', long)]
    room: String,

    /// WebSocket endpoint of the server (the room id is appended as a path segment)
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8080/ws")]
    url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    // Run the client
    if let Err(e) = run_client(args.url, args.room).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
