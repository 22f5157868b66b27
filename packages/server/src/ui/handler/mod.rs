//! Request handlers.

mod http;
mod websocket;

pub use http::{get_room_detail, get_rooms, health_check};
pub use websocket::{websocket_by_path, websocket_by_query};
