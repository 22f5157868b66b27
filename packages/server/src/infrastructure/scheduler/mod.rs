//! Sync tick scheduling.
//!
//! - `interval`: one tokio task per playing room

pub mod interval;

pub use interval::IntervalTickScheduler;
