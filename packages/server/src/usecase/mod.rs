//! UseCase layer
//!
//! 状態を変更するユースケース（接続・切断・コマンド適用・ティック）は
//! 全て `SyncLane` を通して 1 つずつ実行される。

pub mod apply_command;
pub mod connect_viewer;
pub mod disconnect_viewer;
pub mod error;
pub mod get_room_detail;
pub mod get_rooms;
pub mod lane;
pub mod sync_tick;

#[cfg(test)]
pub(crate) mod test_support;

pub use apply_command::ApplyCommandUseCase;
pub use connect_viewer::ConnectViewerUseCase;
pub use disconnect_viewer::DisconnectViewerUseCase;
pub use error::{ApplyCommandError, ConnectError, GetRoomDetailError};
pub use get_room_detail::GetRoomDetailUseCase;
pub use get_rooms::{GetRoomsUseCase, RoomOverview};
pub use lane::SyncLane;
pub use sync_tick::SyncTickUseCase;
