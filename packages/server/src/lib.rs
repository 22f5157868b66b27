//! Watch-party playback synchronization server.
//!
//! Keeps one authoritative playback clock per room and pushes `sync`
//! snapshots to every viewer over WebSocket.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// wiring
pub mod bootstrap;
pub mod config;
