//! Shared utilities for the Syncwatch server and client.

pub mod logger;
pub mod time;
