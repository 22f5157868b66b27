//! Shared application state for the axum handlers.

use std::sync::Arc;

use crate::usecase::{
    ApplyCommandUseCase, ConnectViewerUseCase, DisconnectViewerUseCase, GetRoomDetailUseCase,
    GetRoomsUseCase,
};

use super::origin::AllowedOrigins;

/// Shared application state
pub struct AppState {
    /// ConnectViewerUseCase（視聴者接続のユースケース）
    pub connect_viewer_usecase: Arc<ConnectViewerUseCase>,
    /// DisconnectViewerUseCase（視聴者切断のユースケース）
    pub disconnect_viewer_usecase: Arc<DisconnectViewerUseCase>,
    /// ApplyCommandUseCase（再生コマンド適用のユースケース）
    pub apply_command_usecase: Arc<ApplyCommandUseCase>,
    /// GetRoomsUseCase（ルーム一覧取得のユースケース）
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    /// GetRoomDetailUseCase（ルーム詳細取得のユースケース）
    pub get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
    /// WebSocket 接続を許可するオリジン
    pub allowed_origins: AllowedOrigins,
}
