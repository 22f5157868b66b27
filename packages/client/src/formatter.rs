//! Message formatting utilities for client display.

use syncwatch_server::infrastructure::dto::websocket::{ClientCommand, SyncMessage};
use syncwatch_shared::time::timestamp_to_rfc3339;

use crate::playback::PlaybackSnapshot;

const RULE: &str = "------------------------------------------------------------";

/// Message formatter for client display
pub struct SyncFormatter;

impl SyncFormatter {
    /// Format a playback position as `mm:ss.s`, or `h:mm:ss.s` past an hour
    pub fn format_position(seconds: f64) -> String {
        let tenths = (seconds.max(0.0) * 10.0).round() as u64;
        let hours = tenths / 36_000;
        let minutes = (tenths / 600) % 60;
        let secs = (tenths / 10) % 60;
        let tenth = tenths % 10;

        if hours > 0 {
            format!("{}:{:02}:{:02}.{}", hours, minutes, secs, tenth)
        } else {
            format!("{:02}:{:02}.{}", minutes, secs, tenth)
        }
    }

    fn state_label(is_playing: bool) -> &'static str {
        if is_playing { "▶ playing" } else { "⏸ paused" }
    }

    fn video_label(video_url: &str) -> &str {
        if video_url.is_empty() {
            "(no video)"
        } else {
            video_url
        }
    }

    /// Format a `sync` snapshot received from the server
    ///
    /// # Arguments
    ///
    /// * `message` - The snapshot as sent by the server
    pub fn format_sync(message: &SyncMessage) -> String {
        format!(
            "\n[sync] {} at {}  {}\n       server time {}\n",
            Self::state_label(message.is_playing),
            Self::format_position(message.leader_time),
            Self::video_label(&message.video_url),
            timestamp_to_rfc3339(message.server_timestamp)
        )
    }

    /// Format the locally projected state for the `status` command
    pub fn format_status(snapshot: Option<&PlaybackSnapshot>, position: Option<f64>) -> String {
        let (Some(snapshot), Some(position)) = (snapshot, position) else {
            return "\n(no sync received yet)\n".to_string();
        };

        let mut output = String::new();
        output.push_str(&format!("\n{}\n", RULE));
        output.push_str(&format!("video:    {}\n", Self::video_label(&snapshot.video_url)));
        output.push_str(&format!(
            "state:    {} at {}\n",
            Self::state_label(snapshot.is_playing),
            Self::format_position(position)
        ));
        if let Some(server_timestamp) = snapshot.server_timestamp {
            output.push_str(&format!(
                "last sync: {}\n",
                timestamp_to_rfc3339(server_timestamp)
            ));
        }
        output.push_str(&format!("{}\n", RULE));
        output
    }

    /// Format a confirmation after sending a command
    pub fn format_sent(command: &ClientCommand) -> String {
        let detail = match command {
            ClientCommand::VideoUpdate { video_url } => {
                format!("video {}", video_url.as_deref().unwrap_or_default())
            }
            ClientCommand::Play { current_time } => Self::with_time("play", *current_time),
            ClientCommand::Pause { current_time } => Self::with_time("pause", *current_time),
            ClientCommand::Seek { current_time } => Self::with_time("seek", *current_time),
        };
        format!("sent {}\n", detail)
    }

    fn with_time(name: &str, current_time: Option<f64>) -> String {
        match current_time {
            Some(seconds) => format!("{} {}", name, Self::format_position(seconds)),
            None => name.to_string(),
        }
    }

    pub fn format_help() -> String {
        [
            "",
            "Commands:",
            "  video <url>        load a video and play it from the start",
            "  play [seconds]     resume (optionally from a position)",
            "  pause [seconds]    pause (optionally at a position)",
            "  seek <seconds>     jump, keeping play/pause",
            "  status             show the current position",
            "  quit               leave the room",
            "",
        ]
        .join("\n")
    }

    /// Format a raw text frame that is not a `sync`
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }
}
