//! Domain logic for client-side operations.
//!
//! This module contains pure functions that implement the reconnection policy
//! without side effects, making them easy to test.

use std::time::Duration;

use crate::error::ClientError;

/// Maximum consecutive failed connection attempts before giving up
pub const MAX_RECONNECT_ATTEMPTS: u32 = 5;

/// Delay between reconnection attempts
pub const RECONNECT_INTERVAL: Duration = Duration::from_secs(1);

/// Check if the client should exit immediately based on the error type.
///
/// # Returns
///
/// `true` if retrying cannot help: the server answered the upgrade with a
/// 4xx status (invalid room id, disallowed origin).
pub fn should_exit_immediately(error: &ClientError) -> bool {
    match error {
        ClientError::HandshakeRejected { status } => (400..500).contains(status),
        ClientError::InvalidCommand(_) | ClientError::ReconnectExhausted(_) => true,
        ClientError::ConnectionError(_) | ClientError::ConnectionLost(_) => false,
    }
}

/// Count of consecutive failures after `error`.
///
/// Losing an established connection starts a fresh series of attempts.
pub fn next_failure_count(error: &ClientError, failures: u32) -> u32 {
    match error {
        ClientError::ConnectionLost(_) => 1,
        _ => failures + 1,
    }
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `error` - The client error that occurred
/// * `failures` - Consecutive failed attempts so far, including this one
/// * `max_attempts` - The maximum number of attempts allowed
pub fn should_attempt_reconnect(error: &ClientError, failures: u32, max_attempts: u32) -> bool {
    // Don't reconnect if the error requires immediate exit
    if should_exit_immediately(error) {
        return false;
    }

    // Don't reconnect if we've exhausted all attempts
    failures < max_attempts
}
