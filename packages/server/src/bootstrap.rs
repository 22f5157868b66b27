//! Dependency wiring.

use std::{collections::HashMap, sync::Arc};

use syncwatch_shared::time::Clock;
use tokio::sync::Mutex;

use crate::{
    config::ServerConfig,
    domain::TickScheduler,
    infrastructure::{
        message_pusher::WebSocketMessagePusher, repository::InMemoryRoomStateStore,
        scheduler::IntervalTickScheduler,
    },
    ui::{Server, state::AppState},
    usecase::{
        ApplyCommandUseCase, ConnectViewerUseCase, DisconnectViewerUseCase, GetRoomDetailUseCase,
        GetRoomsUseCase, SyncLane, SyncTickUseCase,
    },
};

/// Build a ready-to-run server from the configuration
///
/// Dependencies are created in order:
/// 1. Repository
/// 2. MessagePusher
/// 3. SyncLane and the tick scheduler
/// 4. UseCases
/// 5. AppState and Server
pub fn build_server(config: &ServerConfig, clock: Arc<dyn Clock>) -> Server {
    // 1. Create Repository (in-memory room state store)
    let repository = Arc::new(InMemoryRoomStateStore::new(clock));

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::new(Arc::new(Mutex::new(
        HashMap::new(),
    ))));

    // 3. Create SyncLane and TickScheduler
    let lane = Arc::new(SyncLane::new());
    let sync_tick_usecase = Arc::new(SyncTickUseCase::new(
        repository.clone(),
        message_pusher.clone(),
        lane.clone(),
    ));
    let scheduler: Arc<dyn TickScheduler> = Arc::new(IntervalTickScheduler::new(
        config.tick_interval,
        sync_tick_usecase,
    ));

    // 4. Create UseCases
    let connect_viewer_usecase = Arc::new(ConnectViewerUseCase::new(
        repository.clone(),
        message_pusher.clone(),
        scheduler.clone(),
        lane.clone(),
    ));
    let disconnect_viewer_usecase = Arc::new(DisconnectViewerUseCase::new(
        message_pusher.clone(),
        lane.clone(),
    ));
    let apply_command_usecase = Arc::new(ApplyCommandUseCase::new(
        repository.clone(),
        message_pusher.clone(),
        scheduler.clone(),
        lane,
    ));
    let get_rooms_usecase = Arc::new(GetRoomsUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let get_room_detail_usecase =
        Arc::new(GetRoomDetailUseCase::new(repository, message_pusher));

    // 5. Create the server
    let app_state = AppState {
        connect_viewer_usecase,
        disconnect_viewer_usecase,
        apply_command_usecase,
        get_rooms_usecase,
        get_room_detail_usecase,
        allowed_origins: config.allowed_origins.clone(),
    };
    Server::new(app_state, scheduler)
}
