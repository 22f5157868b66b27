//! Domain layer: value objects, the playback entity and the ports the
//! use cases depend on.

pub mod entity;
pub mod error;
pub mod message_pusher;
pub mod repository;
pub mod scheduler;
pub mod value_object;

pub use entity::{PlaybackCommand, RoomPlaybackState, playback_seconds};
pub use error::{MessagePushError, ValueObjectError};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use repository::RoomStateRepository;
pub use scheduler::{TickHandler, TickOutcome, TickScheduler};
pub use value_object::{ConnectionId, ROOM_ID_MAX_LENGTH, RoomId, Timestamp};
