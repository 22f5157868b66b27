//! MessagePusher trait 定義
//!
//! クライアントへの通知（プッシュ）のインターフェース。
//! WebSocket などの具体的な送信手段は Infrastructure 層が提供します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectionId, MessagePushError, RoomId, RoomPlaybackState};

/// 接続ごとの送信チャンネル（エンコード済みのテキストフレーム）
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// ルーム単位で接続を管理し、`sync` スナップショットを届ける
///
/// ワイヤー形式へのエンコードは実装側の責務。UseCase 層はドメインモデルだけを渡す。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 接続をルームに登録
    async fn register_client(
        &self,
        room_id: &RoomId,
        connection_id: ConnectionId,
        sender: PusherChannel,
    );

    /// 接続をルームから登録解除し、ルームに残っている接続数を返す
    async fn unregister_client(&self, room_id: &RoomId, connection_id: &ConnectionId) -> usize;

    /// ルームに接続中の全ての接続 ID を取得
    async fn connections_in(&self, room_id: &RoomId) -> Vec<ConnectionId>;

    /// 特定の接続に状態を送信
    async fn push_to(
        &self,
        room_id: &RoomId,
        connection_id: &ConnectionId,
        state: &RoomPlaybackState,
    ) -> Result<(), MessagePushError>;

    /// 複数の接続に状態を送信（一部の送信失敗は許容）
    async fn broadcast(
        &self,
        room_id: &RoomId,
        targets: Vec<ConnectionId>,
        state: &RoomPlaybackState,
    ) -> Result<(), MessagePushError>;
}
