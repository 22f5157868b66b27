//! UseCase: ルーム一覧取得

use std::sync::Arc;

use crate::domain::{MessagePusher, RoomId, RoomPlaybackState, RoomStateRepository};

/// ルームの概要（射影済みの状態と視聴者数）
#[derive(Debug, Clone, PartialEq)]
pub struct RoomOverview {
    pub room_id: RoomId,
    pub state: RoomPlaybackState,
    pub viewers: usize,
}

/// ルーム一覧取得のユースケース
pub struct GetRoomsUseCase {
    repository: Arc<dyn RoomStateRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl GetRoomsUseCase {
    pub fn new(
        repository: Arc<dyn RoomStateRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// これまでに作成された全ルームを ID 順で返す
    pub async fn execute(&self) -> Vec<RoomOverview> {
        let mut overviews = Vec::new();
        for (room_id, state) in self.repository.list().await {
            let viewers = self.message_pusher.connections_in(&room_id).await.len();
            overviews.push(RoomOverview {
                room_id,
                state,
                viewers,
            });
        }
        overviews
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::test_support::{TestHub, room};

    #[tokio::test]
    async fn test_get_rooms_empty() {
        // テスト項目: ルームがない場合は空のリストが返る
        // given (前提条件):
        let hub = TestHub::new();
        let usecase = GetRoomsUseCase::new(hub.repository.clone(), hub.pusher.clone());

        // when (操作):
        let rooms = usecase.execute().await;

        // then (期待する結果):
        assert!(rooms.is_empty());
    }

    #[tokio::test]
    async fn test_get_rooms_with_viewers() {
        // テスト項目: ルームが ID 順に、視聴者数とともに返る
        // given (前提条件):
        let hub = TestHub::new();
        hub.repository.apply_seek(&room("beta"), Some(12.0)).await;
        hub.repository.get(&room("alpha")).await;
        let (_a, _a_rx) = hub.register(&room("beta")).await;
        let (_b, _b_rx) = hub.register(&room("beta")).await;
        let usecase = GetRoomsUseCase::new(hub.repository.clone(), hub.pusher.clone());

        // when (操作):
        let rooms = usecase.execute().await;

        // then (期待する結果):
        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[0].room_id.as_str(), "alpha");
        assert_eq!(rooms[0].viewers, 0);
        assert_eq!(rooms[1].room_id.as_str(), "beta");
        assert_eq!(rooms[1].viewers, 2);
        assert_eq!(rooms[1].state.leader_time, 12.0);
    }
}
