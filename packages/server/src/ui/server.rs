//! Server execution logic.

use std::{future::Future, sync::Arc};

use axum::{Router, routing::get};
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::domain::TickScheduler;

use super::{
    handler::{get_room_detail, get_rooms, health_check, websocket_by_path, websocket_by_query},
    signal::shutdown_signal,
    state::AppState,
};

/// Errors that stop the server
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Watch-party synchronization server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(app_state, scheduler);
/// server.run("127.0.0.1", 8080).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
    /// 終了時に全ティックを止めるため保持する
    scheduler: Arc<dyn TickScheduler>,
}

impl Server {
    pub fn new(state: AppState, scheduler: Arc<dyn TickScheduler>) -> Self {
        Self {
            state: Arc::new(state),
            scheduler,
        }
    }

    /// Build the router with every WebSocket and HTTP endpoint
    pub fn router(&self) -> Router {
        let cors = self.state.allowed_origins.cors_layer();

        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_by_query))
            .route("/ws/{room_id}", get(websocket_by_path))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/rooms", get(get_rooms))
            .route("/api/rooms/{room_id}", get(get_room_detail))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Bind to `host:port` and serve until Ctrl+C or SIGTERM
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: &str, port: u16) -> Result<(), ServerError> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: bind_addr.clone(),
                source,
            })?;

        tracing::info!("Connect to: ws://{}/ws/<room_id>", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        tracing::info!(
            "Syncwatch server listening on {}",
            listener.local_addr()?
        );

        let app = self.router();
        let result = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await;

        self.scheduler.shutdown().await;
        result?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}
