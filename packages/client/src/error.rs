//! Error types for the Syncwatch client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    /// The server answered the upgrade with an HTTP error (invalid room, rejected origin)
    #[error("Server rejected the connection with HTTP {status}")]
    HandshakeRejected { status: u16 },

    /// Could not connect at all
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// An established connection was lost
    #[error("Connection lost: {0}")]
    ConnectionLost(String),

    /// Gave up after repeated failures
    #[error("Failed to reconnect after {0} attempts")]
    ReconnectExhausted(u32),

    /// A typed line could not be understood
    #[error("Invalid command: {0}")]
    InvalidCommand(String),
}
