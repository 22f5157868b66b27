//! WebSocket message DTOs.
//!
//! Every frame is a JSON text frame tagged by its `command` field.

use serde::{Deserialize, Deserializer, Serialize};

/// Client → server playback command.
///
/// Fields are decoded leniently: a field of the wrong JSON type is treated the
/// same as a missing one, so the server falls back to the previous value
/// instead of dropping the whole command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ClientCommand {
    VideoUpdate {
        #[serde(
            default,
            deserialize_with = "lenient_string",
            skip_serializing_if = "Option::is_none"
        )]
        video_url: Option<String>,
    },
    Play {
        #[serde(
            default,
            deserialize_with = "lenient_seconds",
            skip_serializing_if = "Option::is_none"
        )]
        current_time: Option<f64>,
    },
    Pause {
        #[serde(
            default,
            deserialize_with = "lenient_seconds",
            skip_serializing_if = "Option::is_none"
        )]
        current_time: Option<f64>,
    },
    Seek {
        #[serde(
            default,
            deserialize_with = "lenient_seconds",
            skip_serializing_if = "Option::is_none"
        )]
        current_time: Option<f64>,
    },
}

/// Server → client command name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ServerCommand {
    Sync,
}

/// Authoritative playback snapshot sent to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncMessage {
    pub command: ServerCommand,
    pub video_url: String,
    /// Playback position in seconds as of `server_timestamp`
    pub leader_time: f64,
    pub is_playing: bool,
    /// Unix timestamp (milliseconds) the snapshot was taken at
    pub server_timestamp: i64,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(text)) => Some(text),
        _ => None,
    })
}

fn lenient_seconds<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(serde_json::Value::as_f64))
}
