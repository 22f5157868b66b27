//! tokio の interval を使った TickScheduler 実装
//!
//! ## 責務
//!
//! - 再生中のルームごとに 1 つのティックタスクを起動
//! - ティック処理が `TickOutcome::Stop` を返したらタスクを終了し、管理対象から外す
//!
//! ## 停止判定と再開の競合
//!
//! ティック処理 (`on_tick`) はマップのロックを握らずに実行し、ルーム間で待ち合わせない。
//! 実行中のタスクがあるルームに `ensure_running` が呼ばれると、そのタスクに再開要求を立てる。
//! ティックタスクは `on_tick` の前に再開要求を下ろし、`Stop` を受けたらマップのロックの下で
//! 再開要求を確認してから削除する。そのため「停止判定の直後に再生が始まり、
//! どちらもタスクを起動しない」状態は起こらない。

use std::{collections::HashMap, sync::Arc, time::Duration};

use async_trait::async_trait;
use tokio::{
    sync::Mutex,
    task::JoinHandle,
    time::{Instant, MissedTickBehavior},
};

use crate::domain::{RoomId, TickHandler, TickOutcome, TickScheduler};

/// ティック間隔の下限
pub const MIN_TICK_PERIOD: Duration = Duration::from_millis(1);

/// 実行中のティックタスク
struct TickTask {
    handle: JoinHandle<()>,
    /// 直近の `on_tick` 開始後に `ensure_running` が呼ばれたか
    rearm: bool,
}

type TickTasks = Arc<Mutex<HashMap<RoomId, TickTask>>>;

/// ルームごとに tokio タスクで周期実行するスケジューラー
pub struct IntervalTickScheduler {
    /// ティック間隔
    period: Duration,
    /// ティックごとに呼ばれる処理
    handler: Arc<dyn TickHandler>,
    /// 実行中のティックタスク
    tasks: TickTasks,
}

impl IntervalTickScheduler {
    /// 新しい IntervalTickScheduler を作成
    ///
    /// `period` は [`MIN_TICK_PERIOD`] 未満なら切り上げる。
    pub fn new(period: Duration, handler: Arc<dyn TickHandler>) -> Self {
        Self {
            period: period.max(MIN_TICK_PERIOD),
            handler,
            tasks: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl TickScheduler for IntervalTickScheduler {
    async fn ensure_running(&self, room_id: &RoomId) {
        let mut tasks = self.tasks.lock().await;
        if let Some(task) = tasks.get_mut(room_id) {
            task.rearm = true;
            return;
        }

        let handle = tokio::spawn(run_ticks(
            room_id.clone(),
            self.period,
            self.handler.clone(),
            self.tasks.clone(),
        ));
        tasks.insert(
            room_id.clone(),
            TickTask {
                handle,
                rearm: false,
            },
        );
        tracing::debug!(
            "Sync tick started for room '{}' (every {:?})",
            room_id,
            self.period
        );
    }

    async fn is_running(&self, room_id: &RoomId) -> bool {
        self.tasks.lock().await.contains_key(room_id)
    }

    async fn shutdown(&self) {
        let mut tasks = self.tasks.lock().await;
        for (room_id, task) in tasks.drain() {
            task.handle.abort();
            tracing::debug!("Sync tick aborted for room '{}'", room_id);
        }
    }
}

async fn run_ticks(
    room_id: RoomId,
    period: Duration,
    handler: Arc<dyn TickHandler>,
    tasks: TickTasks,
) {
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        if let Some(task) = tasks.lock().await.get_mut(&room_id) {
            task.rearm = false;
        }

        if handler.on_tick(&room_id).await == TickOutcome::Continue {
            continue;
        }

        let mut tasks = tasks.lock().await;
        match tasks.get_mut(&room_id) {
            Some(task) if task.rearm => {
                task.rearm = false;
                tracing::debug!("Sync tick for room '{}' kept alive by a restart", room_id);
            }
            _ => {
                tasks.remove(&room_id);
                tracing::debug!("Sync tick stopped for room '{}'", room_id);
                break;
            }
        }
    }
}
