//! Client execution logic with reconnection support.

use std::{sync::Arc, time::Duration};

use tokio::sync::{Mutex, mpsc};

use crate::{
    domain::{
        MAX_RECONNECT_ATTEMPTS, RECONNECT_INTERVAL, next_failure_count, should_attempt_reconnect,
        should_exit_immediately,
    },
    error::ClientError,
    playback::LocalPlayback,
    session::run_client_session,
    ui::spawn_line_reader,
};

/// Run the interactive client with reconnection logic
pub async fn run_client(url: String, room_id: String) -> Result<(), ClientError> {
    let mut input_rx = spawn_line_reader(&room_id);
    let playback = Arc::new(Mutex::new(LocalPlayback::new()));

    run_with_reconnect(&url, &room_id, &mut input_rx, &playback, RECONNECT_INTERVAL).await
}

/// Run sessions until the user quits, reconnecting after failures
pub async fn run_with_reconnect(
    url: &str,
    room_id: &str,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
    playback: &Arc<Mutex<LocalPlayback>>,
    reconnect_interval: Duration,
) -> Result<(), ClientError> {
    let mut failures = 0;

    loop {
        tracing::info!("Connecting to {} for room '{}'", url, room_id);

        let error = match run_client_session(url, room_id, input_rx, playback).await {
            Ok(()) => {
                tracing::info!("Client session ended normally");
                return Ok(());
            }
            Err(e) => e,
        };

        if should_exit_immediately(&error) {
            tracing::error!("{}. Not retrying.", error);
            return Err(error);
        }

        tracing::warn!("{}", error);
        failures = next_failure_count(&error, failures);
        if !should_attempt_reconnect(&error, failures, MAX_RECONNECT_ATTEMPTS) {
            tracing::error!(
                "Failed to reconnect after {} attempts. Exiting.",
                MAX_RECONNECT_ATTEMPTS
            );
            return Err(ClientError::ReconnectExhausted(MAX_RECONNECT_ATTEMPTS));
        }

        tracing::info!(
            "Reconnecting in {:?}... (attempt {}/{})",
            reconnect_interval,
            failures + 1,
            MAX_RECONNECT_ATTEMPTS
        );
        tokio::time::sleep(reconnect_interval).await;
    }
}
