//! Repository implementations.
//!
//! - `inmemory`: HashMap-backed store (state resets on process restart)

pub mod inmemory;

pub use inmemory::InMemoryRoomStateStore;
