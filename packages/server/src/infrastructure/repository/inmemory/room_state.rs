//! InMemory Room State Store 実装
//!
//! ドメイン層が定義する RoomStateRepository trait の具体的な実装。
//! HashMap をインメモリ DB として使用し、プロセス終了とともに状態は失われます。
//!
//! ルームは最初に参照されたときにデフォルト値で作成され、明示的に削除されることはありません。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use syncwatch_shared::time::Clock;
use tokio::sync::Mutex;

use crate::domain::{RoomId, RoomPlaybackState, RoomStateRepository, Timestamp};

/// インメモリ Room State Store 実装
///
/// ルーム ID ごとの `RoomPlaybackState` を保持し、ドメイン層の RoomStateRepository trait を実装します（依存性の逆転）。
pub struct InMemoryRoomStateStore {
    /// ルーム ID → 再生状態
    rooms: Mutex<HashMap<RoomId, RoomPlaybackState>>,
    /// 現在時刻の取得元
    clock: Arc<dyn Clock>,
}

impl InMemoryRoomStateStore {
    /// 新しい InMemoryRoomStateStore を作成
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
            clock,
        }
    }

    fn now(&self) -> Timestamp {
        Timestamp::new(self.clock.now_millis())
    }

    /// ルームの状態を（必要なら作成して）変更し、変更後のコピーを返す
    async fn update<F>(&self, room_id: &RoomId, mutate: F) -> RoomPlaybackState
    where
        F: FnOnce(&mut RoomPlaybackState, Timestamp) + Send,
    {
        let now = self.now();
        let mut rooms = self.rooms.lock().await;
        let state = rooms.entry(room_id.clone()).or_insert_with(|| {
            tracing::debug!("Room '{}' created with default playback state", room_id);
            RoomPlaybackState::new(now)
        });
        mutate(state, now);
        state.clone()
    }
}

#[async_trait]
impl RoomStateRepository for InMemoryRoomStateStore {
    async fn get(&self, room_id: &RoomId) -> RoomPlaybackState {
        self.update(room_id, |_, _| {}).await
    }

    async fn find(&self, room_id: &RoomId) -> Option<RoomPlaybackState> {
        let now = self.now();
        let rooms = self.rooms.lock().await;
        rooms.get(room_id).map(|state| state.projected(now))
    }

    async fn list(&self) -> Vec<(RoomId, RoomPlaybackState)> {
        let now = self.now();
        let rooms = self.rooms.lock().await;

        let mut snapshots: Vec<(RoomId, RoomPlaybackState)> = rooms
            .iter()
            .map(|(room_id, state)| (room_id.clone(), state.projected(now)))
            .collect();

        // Sort by room_id for consistent ordering
        snapshots.sort_by(|a, b| a.0.cmp(&b.0));

        snapshots
    }

    async fn apply_video_change(
        &self,
        room_id: &RoomId,
        video_url: Option<String>,
    ) -> RoomPlaybackState {
        self.update(room_id, move |state, now| {
            state.apply_video_change(video_url, now)
        })
        .await
    }

    async fn apply_play(&self, room_id: &RoomId, current_time: Option<f64>) -> RoomPlaybackState {
        self.update(room_id, |state, now| state.apply_play(current_time, now))
            .await
    }

    async fn apply_pause(
        &self,
        room_id: &RoomId,
        current_time: Option<f64>,
    ) -> RoomPlaybackState {
        self.update(room_id, |state, now| state.apply_pause(current_time, now))
            .await
    }

    async fn apply_seek(&self, room_id: &RoomId, current_time: Option<f64>) -> RoomPlaybackState {
        self.update(room_id, |state, now| state.apply_seek(current_time, now))
            .await
    }

    async fn project_position(&self, room_id: &RoomId) -> f64 {
        let now = self.now();
        let rooms = self.rooms.lock().await;
        rooms
            .get(room_id)
            .map(|state| state.project_position(now))
            .unwrap_or(0.0)
    }

    async fn refresh(&self, room_id: &RoomId) -> RoomPlaybackState {
        self.update(room_id, |state, now| state.refresh(now)).await
    }
}
