//! UseCase: 視聴者切断処理

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, RoomId};

use super::SyncLane;

/// 視聴者切断のユースケース
///
/// 切断は再生状態を変更せず、他の視聴者にも通知しない。
/// 最後の視聴者が抜けたルームのティックは、次のティックで自ら停止する。
pub struct DisconnectViewerUseCase {
    message_pusher: Arc<dyn MessagePusher>,
    lane: Arc<SyncLane>,
}

impl DisconnectViewerUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>, lane: Arc<SyncLane>) -> Self {
        Self {
            message_pusher,
            lane,
        }
    }

    /// 接続を登録解除し、ルームに残っている接続数を返す
    pub async fn execute(&self, room_id: &RoomId, connection_id: &ConnectionId) -> usize {
        let _lane = self.lane.enter().await;
        self.message_pusher
            .unregister_client(room_id, connection_id)
            .await
    }
}
