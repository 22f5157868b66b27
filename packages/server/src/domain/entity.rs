//! Entity 定義
//!
//! ルームごとの再生状態（リーダーの再生時計）と、それを変更するコマンド。
//! 時刻はすべて引数で受け取る純粋な計算として実装し、時計への依存は Repository に閉じ込める。

use super::value_object::Timestamp;

/// ルームの再生状態
///
/// `leader_time` は `server_timestamp` 時点での再生位置（秒）。
/// 再生中は `server_timestamp` からの経過時間を足したものが現在位置になる。
///
/// 内部的には「位置 0 が再生されていたはずの時刻」（アンカー）を保持し、
/// 再生中の位置は `(now - anchor) / 1000` で射影する。
#[derive(Debug, Clone, PartialEq)]
pub struct RoomPlaybackState {
    /// 再生中の動画 URL（空文字列は未ロード）
    pub video_url: String,
    /// `server_timestamp` 時点での再生位置（秒）
    pub leader_time: f64,
    /// 再生中かどうか
    pub is_playing: bool,
    /// 最後に変更または再送した時刻。ルームごとに単調非減少
    pub server_timestamp: Timestamp,
    anchor: Timestamp,
}

impl RoomPlaybackState {
    /// デフォルト状態（未ロード・位置 0・停止中）を作成
    pub fn new(now: Timestamp) -> Self {
        Self {
            video_url: String::new(),
            leader_time: 0.0,
            is_playing: false,
            server_timestamp: now,
            anchor: now,
        }
    }

    /// 位置 0 が再生されていたはずの時刻
    pub fn anchor(&self) -> Timestamp {
        self.anchor
    }

    /// 動画を切り替え、位置 0 から再生を開始する
    ///
    /// `video_url` が `None` の場合は現在の URL を維持する。
    pub fn apply_video_change(&mut self, video_url: Option<String>, now: Timestamp) {
        let now = self.effective_now(now);

        if let Some(video_url) = video_url {
            self.video_url = video_url;
        }
        self.leader_time = 0.0;
        self.is_playing = true;
        self.anchor = now;
        self.server_timestamp = now;
    }

    /// 指定位置（省略時は現在位置）から再生する
    pub fn apply_play(&mut self, current_time: Option<f64>, now: Timestamp) {
        let now = self.effective_now(now);
        let position = self.resolve_position(current_time, now);

        self.leader_time = position;
        self.is_playing = true;
        self.anchor = anchor_for(position, now);
        self.server_timestamp = now;
    }

    /// 指定位置（省略時は現在位置）で一時停止する
    pub fn apply_pause(&mut self, current_time: Option<f64>, now: Timestamp) {
        let now = self.effective_now(now);
        let position = self.resolve_position(current_time, now);

        self.leader_time = position;
        self.is_playing = false;
        self.server_timestamp = now;
    }

    /// 再生/停止状態を保ったまま位置を移動する
    pub fn apply_seek(&mut self, current_time: Option<f64>, now: Timestamp) {
        let now = self.effective_now(now);
        let position = self.resolve_position(current_time, now);

        self.leader_time = position;
        if self.is_playing {
            self.anchor = anchor_for(position, now);
        }
        self.server_timestamp = now;
    }

    /// 現在の再生位置（秒）を射影する。状態は変更しない。
    pub fn project_position(&self, now: Timestamp) -> f64 {
        if !self.is_playing {
            return self.leader_time;
        }

        let now = self.effective_now(now);
        (now.millis_since(self.anchor) as f64 / 1000.0).max(0.0)
    }

    /// 再送用に `leader_time` を現在位置へ進め、タイムスタンプを更新する
    pub fn refresh(&mut self, now: Timestamp) {
        let now = self.effective_now(now);

        if self.is_playing {
            self.leader_time = self.project_position(now);
        }
        self.server_timestamp = now;
    }

    /// `refresh` 済みのコピーを返す（読み取り専用の参照用）
    pub fn projected(&self, now: Timestamp) -> Self {
        let mut snapshot = self.clone();
        snapshot.refresh(now);
        snapshot
    }

    /// コマンドを適用する
    pub fn apply(&mut self, command: PlaybackCommand, now: Timestamp) {
        match command {
            PlaybackCommand::VideoUpdate { video_url } => self.apply_video_change(video_url, now),
            PlaybackCommand::Play { current_time } => self.apply_play(current_time, now),
            PlaybackCommand::Pause { current_time } => self.apply_pause(current_time, now),
            PlaybackCommand::Seek { current_time } => self.apply_seek(current_time, now),
        }
    }

    /// 時計が巻き戻っても `server_timestamp` が減らないようにする
    fn effective_now(&self, now: Timestamp) -> Timestamp {
        now.max(self.server_timestamp)
    }

    fn resolve_position(&self, current_time: Option<f64>, now: Timestamp) -> f64 {
        match current_time.and_then(playback_seconds) {
            Some(position) => position,
            None => self.project_position(now),
        }
    }
}

/// クライアントから届く再生コマンド
///
/// 値が欠けているフィールドは `None` で表し、適用時に直前の値で補う。
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackCommand {
    VideoUpdate { video_url: Option<String> },
    Play { current_time: Option<f64> },
    Pause { current_time: Option<f64> },
    Seek { current_time: Option<f64> },
}

impl PlaybackCommand {
    /// ワイヤー上のコマンド名
    pub fn name(&self) -> &'static str {
        match self {
            PlaybackCommand::VideoUpdate { .. } => "videoUpdate",
            PlaybackCommand::Play { .. } => "play",
            PlaybackCommand::Pause { .. } => "pause",
            PlaybackCommand::Seek { .. } => "seek",
        }
    }
}

/// 受け付ける再生位置の上限（秒）。ミリ秒に直しても `i64` に余裕を持って収まる
pub const MAX_PLAYBACK_SECONDS: f64 = 1e9;

/// 再生位置として有効な値（有限かつ 0 以上、上限以下）だけを通す
pub fn playback_seconds(value: f64) -> Option<f64> {
    (value.is_finite() && (0.0..=MAX_PLAYBACK_SECONDS).contains(&value)).then_some(value)
}

fn anchor_for(position: f64, now: Timestamp) -> Timestamp {
    let offset_millis = (position * 1000.0).round() as i64;
    Timestamp::new(now.value().saturating_sub(offset_millis))
}
