//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        Path, Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::{HeaderMap, StatusCode, header},
    response::Response,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, PlaybackCommand, RoomId},
    infrastructure::dto::websocket::ClientCommand,
    ui::state::AppState,
};

/// Query parameters for `GET /ws?room_id=...`
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    pub room_id: Option<String>,
}

/// `GET /ws/{room_id}`
pub async fn websocket_by_path(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, StatusCode> {
    upgrade(ws, state, room_id, &headers)
}

/// `GET /ws?room_id=...`
pub async fn websocket_by_query(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
    headers: HeaderMap,
) -> Result<Response, StatusCode> {
    upgrade(ws, state, query.room_id.unwrap_or_default(), &headers)
}

fn upgrade(
    ws: WebSocketUpgrade,
    state: Arc<AppState>,
    room_id: String,
    headers: &HeaderMap,
) -> Result<Response, StatusCode> {
    // 文字列として読めない Origin は不許可のオリジンとして扱う
    let origin = headers
        .get(header::ORIGIN)
        .map(|value| value.to_str().unwrap_or_default());
    if !state.allowed_origins.allows(origin) {
        tracing::warn!("Rejected WebSocket upgrade from origin {:?}", origin);
        return Err(StatusCode::FORBIDDEN);
    }

    // Convert String -> RoomId (Domain Model)
    let room_id = match RoomId::try_from(room_id) {
        Ok(room_id) => room_id,
        Err(e) => {
            tracing::warn!("Rejected WebSocket upgrade with invalid room id: {}", e);
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, room_id)))
}

/// Spawns a task that forwards queued `sync` frames to the WebSocket sender.
///
/// Everything the hub pushes for this connection goes through `rx`, so the
/// order frames leave the server equals the order they were enqueued.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, room_id: RoomId) {
    let (sender, mut receiver) = socket.split();
    let (tx, rx) = mpsc::unbounded_channel();

    // Use ConnectViewerUseCase to register and send the initial sync
    let connection_id = match state.connect_viewer_usecase.execute(&room_id, tx).await {
        Ok((connection_id, snapshot)) => {
            tracing::info!(
                "Connection '{}' joined room '{}' (leaderTime={:.3}, isPlaying={})",
                connection_id,
                room_id,
                snapshot.leader_time,
                snapshot.is_playing
            );
            connection_id
        }
        Err(e) => {
            tracing::warn!("Failed to connect viewer to room '{}': {}", room_id, e);
            return;
        }
    };

    let mut send_task = pusher_loop(rx, sender);

    let recv_state = state.clone();
    let recv_room_id = room_id.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", connection_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    handle_text(&recv_state, &recv_room_id, &connection_id, text.as_str()).await;
                }
                Message::Binary(_) => {
                    tracing::warn!("Ignoring binary frame from '{}'", connection_id);
                }
                Message::Close(_) => {
                    tracing::debug!("Connection '{}' requested close", connection_id);
                    break;
                }
                // Ping/pong is handled automatically by the WebSocket protocol
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    let remaining = state
        .disconnect_viewer_usecase
        .execute(&room_id, &connection_id)
        .await;
    tracing::info!(
        "Connection '{}' left room '{}' ({} remaining)",
        connection_id,
        room_id,
        remaining
    );
}

async fn handle_text(state: &AppState, room_id: &RoomId, connection_id: &ConnectionId, text: &str) {
    let command: PlaybackCommand = match serde_json::from_str::<ClientCommand>(text) {
        Ok(dto) => dto.into(),
        Err(e) => {
            tracing::warn!(
                "Ignoring unparseable frame from '{}': {} ({})",
                connection_id,
                text,
                e
            );
            return;
        }
    };

    if let Err(e) = state
        .apply_command_usecase
        .execute(room_id, connection_id, command)
        .await
    {
        tracing::warn!("Command from '{}' was applied but not delivered: {}", connection_id, e);
    }
}
