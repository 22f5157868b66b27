//! UseCase: 同期ティック
//!
//! 再生中のルームの全視聴者に、現在位置まで進めた `sync` を周期的に再送する。
//! 視聴者がいない、または停止中のルームでは `TickOutcome::Stop` を返してティックを終える。

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{MessagePusher, RoomId, RoomStateRepository, TickHandler, TickOutcome};

use super::SyncLane;

/// 同期ティックのユースケース
pub struct SyncTickUseCase {
    repository: Arc<dyn RoomStateRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    lane: Arc<SyncLane>,
}

impl SyncTickUseCase {
    pub fn new(
        repository: Arc<dyn RoomStateRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        lane: Arc<SyncLane>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            lane,
        }
    }
}

#[async_trait]
impl TickHandler for SyncTickUseCase {
    async fn on_tick(&self, room_id: &RoomId) -> TickOutcome {
        let _lane = self.lane.enter().await;

        let targets = self.message_pusher.connections_in(room_id).await;
        if targets.is_empty() {
            return TickOutcome::Stop;
        }

        let is_playing = self
            .repository
            .find(room_id)
            .await
            .is_some_and(|state| state.is_playing);
        if !is_playing {
            return TickOutcome::Stop;
        }

        let state = self.repository.refresh(room_id).await;
        if let Err(e) = self
            .message_pusher
            .broadcast(room_id, targets, &state)
            .await
        {
            tracing::warn!("Sync tick for room '{}' failed to broadcast: {}", room_id, e);
        }

        TickOutcome::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::test_support::{EPSILON, T0, TestHub, drain, room};

    fn create_usecase(hub: &TestHub) -> SyncTickUseCase {
        SyncTickUseCase::new(hub.repository.clone(), hub.pusher.clone(), hub.lane.clone())
    }

    #[tokio::test]
    async fn test_tick_broadcasts_projected_state_to_everyone() {
        // テスト項目: 再生中のティックは送信者を含む全員に射影済みの sync を送る
        // given (前提条件):
        let hub = TestHub::new();
        hub.repository.apply_play(&room("R1"), Some(5.0)).await;
        let (_alice, mut alice_rx) = hub.register(&room("R1")).await;
        let (_bob, mut bob_rx) = hub.register(&room("R1")).await;
        hub.clock.advance(500);
        let usecase = create_usecase(&hub);

        // when (操作):
        let outcome = usecase.on_tick(&room("R1")).await;

        // then (期待する結果):
        assert_eq!(outcome, TickOutcome::Continue);
        for rx in [&mut alice_rx, &mut bob_rx] {
            let messages = drain(rx);
            assert_eq!(messages.len(), 1);
            assert!(messages[0].is_playing);
            assert!((messages[0].leader_time - 5.5).abs() < EPSILON);
            assert_eq!(messages[0].server_timestamp, T0 + 500);
        }
    }

    #[tokio::test]
    async fn test_tick_stops_when_paused() {
        // テスト項目: 停止中のルームではティックが止まり、何も送らない
        // given (前提条件):
        let hub = TestHub::new();
        hub.repository.apply_pause(&room("R1"), Some(5.0)).await;
        let (_alice, mut alice_rx) = hub.register(&room("R1")).await;
        let usecase = create_usecase(&hub);

        // when (操作):
        let outcome = usecase.on_tick(&room("R1")).await;

        // then (期待する結果):
        assert_eq!(outcome, TickOutcome::Stop);
        assert!(drain(&mut alice_rx).is_empty());
    }

    #[tokio::test]
    async fn test_tick_stops_when_room_is_empty() {
        // テスト項目: 視聴者のいないルームではティックが止まり、状態も進めない
        // given (前提条件):
        let hub = TestHub::new();
        hub.repository.apply_play(&room("R1"), Some(5.0)).await;
        hub.clock.advance(1_000);
        let usecase = create_usecase(&hub);

        // when (操作):
        let outcome = usecase.on_tick(&room("R1")).await;

        // then (期待する結果):
        assert_eq!(outcome, TickOutcome::Stop);
        let stored = hub.repository.find(&room("R1")).await.unwrap();
        assert!((stored.leader_time - 6.0).abs() < EPSILON);
    }

    #[tokio::test]
    async fn test_tick_timestamps_are_non_decreasing() {
        // テスト項目: 連続したティックの serverTimestamp は減らない
        // given (前提条件):
        let hub = TestHub::new();
        hub.repository.apply_play(&room("R1"), Some(0.0)).await;
        let (_alice, mut alice_rx) = hub.register(&room("R1")).await;
        let usecase = create_usecase(&hub);

        // when (操作):
        usecase.on_tick(&room("R1")).await;
        hub.clock.set(T0 - 10_000);
        usecase.on_tick(&room("R1")).await;
        hub.clock.set(T0 + 500);
        usecase.on_tick(&room("R1")).await;

        // then (期待する結果):
        let timestamps: Vec<i64> = drain(&mut alice_rx)
            .iter()
            .map(|message| message.server_timestamp)
            .collect();
        assert_eq!(timestamps, vec![T0, T0, T0 + 500]);
    }
}
