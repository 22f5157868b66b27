//! Watch-party synchronization server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin syncwatch-server
//! cargo run --bin syncwatch-server -- --host 0.0.0.0 --port 3000 --allowed-origin '*'
//! ```

use std::sync::Arc;

use clap::Parser;
use syncwatch_server::{
    bootstrap::build_server,
    config::{Args, ServerConfig},
};
use syncwatch_shared::{logger::setup_logger, time::SystemClock};

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let config = ServerConfig::from(Args::parse());
    tracing::info!(
        "Allowed origins: {:?}, sync tick every {:?}",
        config.allowed_origins,
        config.tick_interval
    );

    let server = build_server(&config, Arc::new(SystemClock));
    if let Err(e) = server.run(&config.host, config.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
