//! UseCase テスト用の共通フィクスチャ

use std::{collections::HashMap, sync::Arc};

use syncwatch_shared::time::ManualClock;
use tokio::sync::{Mutex, mpsc};

use crate::{
    domain::{ConnectionId, MessagePusher, RoomId, scheduler::MockTickScheduler},
    infrastructure::{
        dto::websocket::SyncMessage, message_pusher::WebSocketMessagePusher,
        repository::InMemoryRoomStateStore,
    },
};

use super::SyncLane;

pub const T0: i64 = 1_700_000_000_000;
pub const EPSILON: f64 = 0.05;

/// 実際のインメモリ実装で組み立てた同期ハブ
pub struct TestHub {
    pub clock: Arc<ManualClock>,
    pub repository: Arc<InMemoryRoomStateStore>,
    pub pusher: Arc<WebSocketMessagePusher>,
    pub lane: Arc<SyncLane>,
}

impl TestHub {
    pub fn new() -> Self {
        let clock = Arc::new(ManualClock::new(T0));
        Self {
            repository: Arc::new(InMemoryRoomStateStore::new(clock.clone())),
            pusher: Arc::new(WebSocketMessagePusher::new(Arc::new(Mutex::new(
                HashMap::new(),
            )))),
            lane: Arc::new(SyncLane::new()),
            clock,
        }
    }

    /// UseCase を経由せずに接続を登録する
    pub async fn register(&self, room_id: &RoomId) -> (ConnectionId, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let connection_id = ConnectionId::generate();
        self.pusher.register_client(room_id, connection_id, tx).await;
        (connection_id, rx)
    }
}

pub fn room(id: &str) -> RoomId {
    RoomId::new(id.to_string()).unwrap()
}

/// ensure_running を何回呼ばれても良いスケジューラー
pub fn permissive_scheduler() -> Arc<MockTickScheduler> {
    let mut scheduler = MockTickScheduler::new();
    scheduler.expect_ensure_running().returning(|_| ());
    Arc::new(scheduler)
}

pub fn decode(json: &str) -> SyncMessage {
    serde_json::from_str(json).unwrap()
}

/// 受信済みのメッセージを全て取り出す
pub fn drain(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<SyncMessage> {
    let mut messages = Vec::new();
    while let Ok(json) = rx.try_recv() {
        messages.push(decode(&json));
    }
    messages
}
