//! Local view of the room's playback clock.
//!
//! Positions are projected from the instant a snapshot was received (or a
//! local command was sent), never from the server's timestamp, so clock skew
//! between client and server does not shift the displayed position.

use std::time::Instant;

use syncwatch_server::infrastructure::dto::websocket::{ClientCommand, SyncMessage};

/// Last known playback state and when it was observed locally
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackSnapshot {
    pub video_url: String,
    /// Position in seconds at `observed_at`
    pub position: f64,
    pub is_playing: bool,
    pub observed_at: Instant,
    /// Server timestamp of the last `sync`, if the snapshot came from the server
    pub server_timestamp: Option<i64>,
}

impl PlaybackSnapshot {
    pub fn position_at(&self, now: Instant) -> f64 {
        if !self.is_playing {
            return self.position;
        }
        self.position + now.saturating_duration_since(self.observed_at).as_secs_f64()
    }
}

#[derive(Debug, Clone, Default)]
pub struct LocalPlayback {
    snapshot: Option<PlaybackSnapshot>,
}

impl LocalPlayback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Option<&PlaybackSnapshot> {
        self.snapshot.as_ref()
    }

    /// Adopt an authoritative `sync` received at `now`
    pub fn apply_sync(&mut self, message: &SyncMessage, now: Instant) {
        self.snapshot = Some(PlaybackSnapshot {
            video_url: message.video_url.clone(),
            position: message.leader_time,
            is_playing: message.is_playing,
            observed_at: now,
            server_timestamp: Some(message.server_timestamp),
        });
    }

    /// Apply our own command optimistically; the server does not echo it back
    pub fn apply_local(&mut self, command: &ClientCommand, now: Instant) {
        let (video_url, current, is_playing, server_timestamp) = match &self.snapshot {
            Some(snapshot) => (
                snapshot.video_url.clone(),
                snapshot.position_at(now),
                snapshot.is_playing,
                snapshot.server_timestamp,
            ),
            None => (String::new(), 0.0, false, None),
        };

        let (video_url, position, is_playing) = match command {
            ClientCommand::VideoUpdate { video_url: url } => {
                (url.clone().unwrap_or(video_url), 0.0, true)
            }
            ClientCommand::Play { current_time } => {
                (video_url, current_time.unwrap_or(current), true)
            }
            ClientCommand::Pause { current_time } => {
                (video_url, current_time.unwrap_or(current), false)
            }
            ClientCommand::Seek { current_time } => {
                (video_url, current_time.unwrap_or(current), is_playing)
            }
        };

        self.snapshot = Some(PlaybackSnapshot {
            video_url,
            position,
            is_playing,
            observed_at: now,
            server_timestamp,
        });
    }

    pub fn position_at(&self, now: Instant) -> Option<f64> {
        self.snapshot
            .as_ref()
            .map(|snapshot| snapshot.position_at(now))
    }
}
