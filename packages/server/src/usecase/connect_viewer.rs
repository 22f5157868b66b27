//! UseCase: 視聴者接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectViewerUseCase::execute() メソッド
//! - 接続の登録と、射影済みの初回 sync の送信
//!
//! ### なぜこのテストが必要か
//! - 途中参加者が古い状態ではなく現在のリーダー位置を受け取ることを保証
//! - 再生中のルームに参加したとき、止まっていたティックが再開されることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：未知のルームへの接続（デフォルト状態の作成）
//! - 正常系：再生中のルームへの途中参加
//! - 異常系：送信チャンネルが既に閉じている接続

use std::sync::Arc;

use crate::domain::{
    ConnectionId, MessagePusher, PusherChannel, RoomId, RoomPlaybackState, RoomStateRepository,
    TickScheduler,
};

use super::{SyncLane, error::ConnectError};

/// 視聴者接続のユースケース
pub struct ConnectViewerUseCase {
    /// Repository（ルーム再生状態の抽象化）
    repository: Arc<dyn RoomStateRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// TickScheduler（同期ティックの抽象化）
    scheduler: Arc<dyn TickScheduler>,
    /// 同期ハブの直列化レーン
    lane: Arc<SyncLane>,
}

impl ConnectViewerUseCase {
    /// 新しい ConnectViewerUseCase を作成
    pub fn new(
        repository: Arc<dyn RoomStateRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        scheduler: Arc<dyn TickScheduler>,
        lane: Arc<SyncLane>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            scheduler,
            lane,
        }
    }

    /// 視聴者接続を実行
    ///
    /// # Arguments
    ///
    /// * `room_id` - 接続先のルーム（未知のルームはデフォルト状態で作成される）
    /// * `sender` - クライアントへのメッセージ送信用チャンネル
    ///
    /// # Returns
    ///
    /// * `Ok((ConnectionId, RoomPlaybackState))` - 採番した接続 ID と、送信した初回 sync の状態
    /// * `Err(ConnectError)` - 初回 sync を送信できなかった
    pub async fn execute(
        &self,
        room_id: &RoomId,
        sender: PusherChannel,
    ) -> Result<(ConnectionId, RoomPlaybackState), ConnectError> {
        let connection_id = ConnectionId::generate();

        let state = {
            let _lane = self.lane.enter().await;

            // 1. MessagePusher に接続を登録
            self.message_pusher
                .register_client(room_id, connection_id, sender)
                .await;

            // 2. 現在位置まで射影した状態を初回 sync として送信
            let state = self.repository.refresh(room_id).await;
            if let Err(e) = self
                .message_pusher
                .push_to(room_id, &connection_id, &state)
                .await
            {
                self.message_pusher
                    .unregister_client(room_id, &connection_id)
                    .await;
                return Err(ConnectError::InitialSyncFailed(e.to_string()));
            }

            state
        };

        // 3. 再生中ならティックを（再）開始
        if state.is_playing {
            self.scheduler.ensure_running(room_id).await;
        }

        Ok((connection_id, state))
    }
}
