//! 同期ハブの直列化レーン
//!
//! 接続・切断・コマンド適用・ティックは全てこのレーンを通して 1 つずつ実行される。
//! 状態の変更と、その結果のブロードキャストの投入が 1 ステップで完了するため、
//! ルーム内の `sync` はサーバー側の到着順・ティック順に全順序付けされる。

use tokio::sync::{Mutex, MutexGuard};

/// 状態を変更する処理を 1 つずつ通すためのレーン
#[derive(Debug, Default)]
pub struct SyncLane {
    gate: Mutex<()>,
}

impl SyncLane {
    pub fn new() -> Self {
        Self::default()
    }

    /// レーンに入る。ガードを破棄するまで他の処理は待たされる
    pub async fn enter(&self) -> MutexGuard<'_, ()> {
        self.gate.lock().await
    }
}
