//! UseCase 層のエラー定義

use thiserror::Error;

/// 視聴者接続のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    /// 初回の sync を届けられなかった（接続は登録解除済み）
    #[error("failed to deliver initial sync: {0}")]
    InitialSyncFailed(String),
}

/// コマンド適用のエラー
///
/// 状態の変更自体は常に成功する。失敗しうるのは他の接続への通知だけ。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplyCommandError {
    #[error("failed to broadcast sync: {0}")]
    BroadcastFailed(String),
}

/// ルーム詳細取得のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetRoomDetailError {
    #[error("room not found")]
    RoomNotFound,
}
