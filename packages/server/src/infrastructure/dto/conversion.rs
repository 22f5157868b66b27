//! Conversion logic between DTOs and domain entities.

use syncwatch_shared::time::timestamp_to_rfc3339;

use crate::{
    domain::{PlaybackCommand, RoomId, RoomPlaybackState},
    infrastructure::dto::{http as http_dto, websocket as ws_dto},
};

// ========================================
// DTO → Domain Entity
// ========================================

impl From<ws_dto::ClientCommand> for PlaybackCommand {
    fn from(dto: ws_dto::ClientCommand) -> Self {
        match dto {
            ws_dto::ClientCommand::VideoUpdate { video_url } => {
                PlaybackCommand::VideoUpdate { video_url }
            }
            ws_dto::ClientCommand::Play { current_time } => PlaybackCommand::Play { current_time },
            ws_dto::ClientCommand::Pause { current_time } => {
                PlaybackCommand::Pause { current_time }
            }
            ws_dto::ClientCommand::Seek { current_time } => PlaybackCommand::Seek { current_time },
        }
    }
}

// ========================================
// Domain Entity → DTO
// ========================================

impl From<&RoomPlaybackState> for ws_dto::SyncMessage {
    fn from(model: &RoomPlaybackState) -> Self {
        Self {
            command: ws_dto::ServerCommand::Sync,
            video_url: model.video_url.clone(),
            leader_time: model.leader_time,
            is_playing: model.is_playing,
            server_timestamp: model.server_timestamp.value(),
        }
    }
}

/// Build the HTTP room summary from a projected state and its viewer count
pub fn to_room_summary(
    room_id: &RoomId,
    state: &RoomPlaybackState,
    viewers: usize,
) -> http_dto::RoomSummaryDto {
    http_dto::RoomSummaryDto {
        id: room_id.as_str().to_string(),
        video_url: state.video_url.clone(),
        leader_time: state.leader_time,
        is_playing: state.is_playing,
        server_timestamp: timestamp_to_rfc3339(state.server_timestamp.value()),
        viewers,
    }
}
