//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - ルームごとに接続中クライアントの `UnboundedSender` を管理
//! - 再生状態を `sync` メッセージ（JSON）にエンコードして送信（push_to, broadcast）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、メッセージ送信に使用します。
//! 送信は非同期チャンネルへの投入だけで完了するため、呼び出し側の順序がそのまま
//! 接続ごとの配信順序になります。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{
        ConnectionId, MessagePushError, MessagePusher, PusherChannel, RoomId, RoomPlaybackState,
    },
    infrastructure::dto::websocket::SyncMessage,
};

/// ルーム ID → (接続 ID → sender)
pub type RoomConnections = HashMap<RoomId, HashMap<ConnectionId, PusherChannel>>;

/// WebSocket を使った MessagePusher 実装
///
/// ## 使用例
///
/// ```ignore
/// let pusher = WebSocketMessagePusher::new(Arc::new(Mutex::new(HashMap::new())));
///
/// pusher.register_client(&room_id, connection_id, tx).await;
/// pusher.push_to(&room_id, &connection_id, &state).await?;
/// ```
pub struct WebSocketMessagePusher {
    /// 接続中のクライアントの WebSocket sender（ルーム単位）
    rooms: Arc<Mutex<RoomConnections>>,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new(rooms: Arc<Mutex<RoomConnections>>) -> Self {
        Self { rooms }
    }

    fn encode(state: &RoomPlaybackState) -> Result<String, MessagePushError> {
        serde_json::to_string(&SyncMessage::from(state))
            .map_err(|e| MessagePushError::EncodeFailed(e.to_string()))
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(
        &self,
        room_id: &RoomId,
        connection_id: ConnectionId,
        sender: PusherChannel,
    ) {
        let mut rooms = self.rooms.lock().await;
        rooms
            .entry(room_id.clone())
            .or_default()
            .insert(connection_id, sender);
        tracing::debug!(
            "Connection '{}' registered to MessagePusher in room '{}'",
            connection_id,
            room_id
        );
    }

    async fn unregister_client(&self, room_id: &RoomId, connection_id: &ConnectionId) -> usize {
        let mut rooms = self.rooms.lock().await;

        let remaining = match rooms.get_mut(room_id) {
            Some(connections) => {
                connections.remove(connection_id);
                connections.len()
            }
            None => 0,
        };
        if remaining == 0 {
            rooms.remove(room_id);
        }

        tracing::debug!(
            "Connection '{}' unregistered from MessagePusher in room '{}' ({} remaining)",
            connection_id,
            room_id,
            remaining
        );
        remaining
    }

    async fn connections_in(&self, room_id: &RoomId) -> Vec<ConnectionId> {
        let rooms = self.rooms.lock().await;
        rooms
            .get(room_id)
            .map(|connections| connections.keys().copied().collect())
            .unwrap_or_default()
    }

    async fn push_to(
        &self,
        room_id: &RoomId,
        connection_id: &ConnectionId,
        state: &RoomPlaybackState,
    ) -> Result<(), MessagePushError> {
        let content = Self::encode(state)?;
        let rooms = self.rooms.lock().await;

        let sender = rooms
            .get(room_id)
            .and_then(|connections| connections.get(connection_id))
            .ok_or_else(|| MessagePushError::ClientNotFound(connection_id.to_string()))?;

        sender
            .send(content)
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed sync to connection '{}'", connection_id);
        Ok(())
    }

    async fn broadcast(
        &self,
        room_id: &RoomId,
        targets: Vec<ConnectionId>,
        state: &RoomPlaybackState,
    ) -> Result<(), MessagePushError> {
        if targets.is_empty() {
            return Ok(());
        }

        let content = Self::encode(state)?;
        let rooms = self.rooms.lock().await;
        let Some(connections) = rooms.get(room_id) else {
            tracing::debug!("Room '{}' has no connections, skipping broadcast", room_id);
            return Ok(());
        };

        for target in targets {
            match connections.get(&target) {
                // ブロードキャストでは一部の送信失敗を許容
                Some(sender) => {
                    if let Err(e) = sender.send(content.clone()) {
                        tracing::warn!("Failed to push sync to connection '{}': {}", target, e);
                    }
                }
                None => {
                    tracing::warn!(
                        "Connection '{}' not found in room '{}' during broadcast, skipping",
                        target,
                        room_id
                    );
                }
            }
        }

        Ok(())
    }
}
