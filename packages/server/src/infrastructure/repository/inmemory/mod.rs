//! In-memory repository implementations.

pub mod room_state;

pub use room_state::InMemoryRoomStateStore;
