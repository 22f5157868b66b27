//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{RoomId, RoomPlaybackState};

/// ルーム再生状態の Repository trait
///
/// ルーム ID ごとに 1 つの `RoomPlaybackState` を保持するストアへのインターフェース。
/// 現在時刻は実装側が持つ時計から取得する。
///
/// ## 失敗しない操作
///
/// 未知のルームは常にデフォルト値で作成されるため、どの操作もエラーを返さない。
/// 書き込みは後勝ち（last-writer-wins）で、競合検出は行わない。
///
/// ## 依存性の逆転（DIP）
///
/// - UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には依存しない
#[async_trait]
pub trait RoomStateRepository: Send + Sync {
    /// ルームの状態を取得（存在しなければデフォルト値で作成）
    async fn get(&self, room_id: &RoomId) -> RoomPlaybackState;

    /// ルームの状態を射影して取得（存在しなければ `None`、作成はしない）
    async fn find(&self, room_id: &RoomId) -> Option<RoomPlaybackState>;

    /// 全ルームの射影済み状態を取得（ルーム ID 順）
    async fn list(&self) -> Vec<(RoomId, RoomPlaybackState)>;

    /// 動画を切り替えて位置 0 から再生
    async fn apply_video_change(
        &self,
        room_id: &RoomId,
        video_url: Option<String>,
    ) -> RoomPlaybackState;

    /// 指定位置（省略時は直前の位置）から再生
    async fn apply_play(&self, room_id: &RoomId, current_time: Option<f64>) -> RoomPlaybackState;

    /// 指定位置（省略時は直前の位置）で一時停止
    async fn apply_pause(&self, room_id: &RoomId, current_time: Option<f64>)
    -> RoomPlaybackState;

    /// 再生/停止状態を保ったまま位置を移動
    async fn apply_seek(&self, room_id: &RoomId, current_time: Option<f64>) -> RoomPlaybackState;

    /// 現在の再生位置（秒）を射影する。状態は変更しない
    async fn project_position(&self, room_id: &RoomId) -> f64;

    /// 再送用に状態を現在時刻へ進めて返す
    async fn refresh(&self, room_id: &RoomId) -> RoomPlaybackState;
}
