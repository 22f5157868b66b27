//! Axum server: WebSocket sync endpoint, HTTP API and origin policy.

mod handler;
pub mod origin;
mod server;
mod signal;
pub mod state;

pub use origin::AllowedOrigins;
pub use server::{Server, ServerError};
pub use signal::shutdown_signal;
