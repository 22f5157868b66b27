//! Infrastructure layer: concrete adapters for the domain ports.

pub mod dto;
pub mod message_pusher;
pub mod repository;
pub mod scheduler;
