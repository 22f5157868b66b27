//! UseCase: ルーム詳細取得

use std::sync::Arc;

use crate::domain::{MessagePusher, RoomId, RoomStateRepository};

use super::{error::GetRoomDetailError, get_rooms::RoomOverview};

/// ルーム詳細取得のユースケース
///
/// 参照だけでルームを作成しないよう、`find` を使う。
pub struct GetRoomDetailUseCase {
    repository: Arc<dyn RoomStateRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl GetRoomDetailUseCase {
    pub fn new(
        repository: Arc<dyn RoomStateRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    pub async fn execute(&self, room_id: &RoomId) -> Result<RoomOverview, GetRoomDetailError> {
        let state = self
            .repository
            .find(room_id)
            .await
            .ok_or(GetRoomDetailError::RoomNotFound)?;
        let viewers = self.message_pusher.connections_in(room_id).await.len();

        Ok(RoomOverview {
            room_id: room_id.clone(),
            state,
            viewers,
        })
    }
}
