//! UseCase: 再生コマンドの適用
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ApplyCommandUseCase::execute() メソッド
//! - 状態の更新と、送信者以外の視聴者へのブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - 送信者自身に即時の sync を返さない（ローカル操作を巻き戻さない）ことを保証
//! - 再生系のコマンドでティックが起動されることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：videoUpdate / play / pause / seek の各コマンド
//! - 正常系：currentTime が欠けたコマンド（現在位置で補完）
//! - 異常系：ブロードキャストの失敗（状態の変更は残る）

use std::sync::Arc;

use crate::domain::{
    ConnectionId, MessagePusher, PlaybackCommand, RoomId, RoomPlaybackState, RoomStateRepository,
    TickScheduler,
};

use super::{SyncLane, error::ApplyCommandError};

/// 再生コマンド適用のユースケース
pub struct ApplyCommandUseCase {
    /// Repository（ルーム再生状態の抽象化）
    repository: Arc<dyn RoomStateRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// TickScheduler（同期ティックの抽象化）
    scheduler: Arc<dyn TickScheduler>,
    lane: Arc<SyncLane>,
}

impl ApplyCommandUseCase {
    /// 新しい ApplyCommandUseCase を作成
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

    /// コマンドを適用し、送信者以外の視聴者に新しい状態を通知
    ///
    /// # Arguments
    ///
    /// * `room_id` - 送信者が参加しているルーム
    /// * `sender_id` - コマンドを送った接続（通知対象から除外される）
    /// * `command` - 適用する再生コマンド
    ///
    /// # Returns
    ///
    /// * `Ok(RoomPlaybackState)` - 適用後の状態
    /// * `Err(ApplyCommandError)` - 状態は更新済みだが通知に失敗した
    pub async fn execute(
        &self,
        room_id: &RoomId,
        sender_id: &ConnectionId,
        command: PlaybackCommand,
    ) -> Result<RoomPlaybackState, ApplyCommandError> {
        let command_name = command.name();

        let (state, broadcast_result) = {
            let _lane = self.lane.enter().await;

            // 1. Repository で状態を更新
            let state = match command {
                PlaybackCommand::VideoUpdate { video_url } => {
                    self.repository.apply_video_change(room_id, video_url).await
                }
                PlaybackCommand::Play { current_time } => {
                    self.repository.apply_play(room_id, current_time).await
                }
                PlaybackCommand::Pause { current_time } => {
                    self.repository.apply_pause(room_id, current_time).await
                }
                PlaybackCommand::Seek { current_time } => {
                    self.repository.apply_seek(room_id, current_time).await
                }
            };
            tracing::info!(
                "Room '{}' {} by '{}': leaderTime={:.3}, isPlaying={}",
                room_id,
                command_name,
                sender_id,
                state.leader_time,
                state.is_playing
            );

            // 2. 送信者以外にブロードキャスト
            let targets: Vec<ConnectionId> = self
                .message_pusher
                .connections_in(room_id)
                .await
                .into_iter()
                .filter(|connection_id| connection_id != sender_id)
                .collect();
            let broadcast_result = self
                .message_pusher
                .broadcast(room_id, targets, &state)
                .await;

            (state, broadcast_result)
        };

        // 3. 再生中ならティックを（再）開始
        if state.is_playing {
            self.scheduler.ensure_running(room_id).await;
        }

        broadcast_result.map_err(|e| ApplyCommandError::BroadcastFailed(e.to_string()))?;
        Ok(state)
    }
}
