//! 同期ティックのスケジューリング
//!
//! 再生中のルームごとに周期的な再送（sync tick）を走らせるためのインターフェース。

use async_trait::async_trait;

use super::RoomId;

/// 1 回のティック処理の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// 次のティックも実行する
    Continue,
    /// このルームのティックを停止する（停止中、または接続がない）
    Stop,
}

/// ティックごとに呼ばれる処理
#[async_trait]
pub trait TickHandler: Send + Sync {
    async fn on_tick(&self, room_id: &RoomId) -> TickOutcome;
}

/// ルームごとのティックを管理するスケジューラー
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TickScheduler: Send + Sync {
    /// ルームのティックが動いていなければ開始する
    async fn ensure_running(&self, room_id: &RoomId);

    /// ルームのティックが動いているかどうか
    async fn is_running(&self, room_id: &RoomId) -> bool;

    /// 全てのティックを停止する
    async fn shutdown(&self);
}
