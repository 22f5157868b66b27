//! WebSocket client session management.

use std::{sync::Arc, time::Instant};

use futures_util::{SinkExt, StreamExt};
use syncwatch_server::infrastructure::dto::websocket::SyncMessage;
use tokio::sync::{Mutex, mpsc};
use tokio_tungstenite::{
    connect_async,
    tungstenite::{self, protocol::Message},
};

use crate::{
    error::ClientError,
    formatter::SyncFormatter,
    input::{InputCommand, parse_input},
    playback::LocalPlayback,
};

use super::ui::redisplay_prompt;

/// Build `<url>/<room_id>` with the room id percent-encoded as a path segment
pub fn room_endpoint(url: &str, room_id: &str) -> String {
    let mut segment = String::with_capacity(room_id.len());
    for byte in room_id.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~') {
            segment.push(byte as char);
        } else {
            segment.push_str(&format!("%{:02X}", byte));
        }
    }
    format!("{}/{}", url.trim_end_matches('/'), segment)
}

/// Run one WebSocket session until the user quits or the connection drops
///
/// # Returns
///
/// * `Ok(())` - the user quit (`quit`, Ctrl+C, Ctrl+D)
/// * `Err(ClientError)` - the handshake failed or the connection was lost
pub async fn run_client_session(
    url: &str,
    room_id: &str,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
    playback: &Arc<Mutex<LocalPlayback>>,
) -> Result<(), ClientError> {
    let endpoint = room_endpoint(url, room_id);

    let (ws_stream, _response) =
        connect_async(endpoint.as_str())
            .await
            .map_err(|e| match e {
                tungstenite::Error::Http(response) => ClientError::HandshakeRejected {
                    status: response.status().as_u16(),
                },
                other => ClientError::ConnectionError(other.to_string()),
            })?;

    tracing::info!("Connected to {}", endpoint);
    println!(
        "\nJoined room '{}'. Type 'help' for commands. Press Ctrl+C to exit.\n",
        room_id
    );

    let (mut write, mut read) = ws_stream.split();

    // Spawn a task to handle incoming sync messages
    let reader_playback = playback.clone();
    let reader_room_id = room_id.to_string();
    let mut read_task = tokio::spawn(async move {
        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    match serde_json::from_str::<SyncMessage>(text.as_str()) {
                        Ok(sync) => {
                            reader_playback
                                .lock()
                                .await
                                .apply_sync(&sync, Instant::now());
                            print!("{}", SyncFormatter::format_sync(&sync));
                        }
                        Err(_) => print!("{}", SyncFormatter::format_raw_message(text.as_str())),
                    }
                    redisplay_prompt(&reader_room_id);
                }
                Ok(Message::Close(_)) => return "server closed the connection".to_string(),
                Err(e) => return e.to_string(),
                _ => {}
            }
        }
        "stream ended".to_string()
    });

    let result = loop {
        tokio::select! {
            reason = &mut read_task => {
                let reason = reason.unwrap_or_else(|e| e.to_string());
                break Err(ClientError::ConnectionLost(reason));
            }
            line = input_rx.recv() => {
                // The line reader is gone (Ctrl+C / Ctrl+D)
                let Some(line) = line else {
                    break Ok(());
                };

                match parse_input(&line) {
                    Ok(InputCommand::Quit) => break Ok(()),
                    Ok(InputCommand::Help) => println!("{}", SyncFormatter::format_help()),
                    Ok(InputCommand::Status) => {
                        let playback = playback.lock().await;
                        let now = Instant::now();
                        print!(
                            "{}",
                            SyncFormatter::format_status(playback.snapshot(), playback.position_at(now))
                        );
                    }
                    Ok(InputCommand::Send(command)) => {
                        let json = match serde_json::to_string(&command) {
                            Ok(json) => json,
                            Err(e) => {
                                tracing::error!("Failed to serialize command: {}", e);
                                continue;
                            }
                        };

                        if let Err(e) = write.send(Message::Text(json.into())).await {
                            tracing::warn!("Failed to send command: {}", e);
                            break Err(ClientError::ConnectionLost(e.to_string()));
                        }

                        playback.lock().await.apply_local(&command, Instant::now());
                        print!("{}", SyncFormatter::format_sent(&command));
                    }
                    Err(e) => println!("{}", e),
                }
                redisplay_prompt(room_id);
            }
        }
    };

    read_task.abort();
    if result.is_ok() {
        write.send(Message::Close(None)).await.ok();
    }
    result
}
