//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Room entry returned by `GET /api/rooms` and `GET /api/rooms/{room_id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummaryDto {
    pub id: String,
    pub video_url: String,
    /// Projected playback position in seconds
    pub leader_time: f64,
    pub is_playing: bool,
    /// RFC 3339 time the position was projected at
    pub server_timestamp: String,
    /// Number of connections currently in the room
    pub viewers: usize,
}
