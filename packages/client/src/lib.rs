//! Command-line viewer for Syncwatch rooms.
//!
//! Joins one room, prints every `sync` snapshot with a locally projected
//! position, and sends playback commands typed at the prompt.

pub mod domain;
pub mod error;
pub mod formatter;
pub mod input;
pub mod playback;
pub mod runner;
pub mod session;
pub mod ui;
