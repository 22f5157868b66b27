//! Client session tests against an in-process server.

use std::{sync::Arc, time::Duration};

use futures_util::{Stream, StreamExt};
use syncwatch_client::{
    error::ClientError,
    playback::LocalPlayback,
    runner::run_with_reconnect,
    session::{room_endpoint, run_client_session},
};
use syncwatch_server::{
    bootstrap::build_server, config::ServerConfig,
    infrastructure::dto::websocket::SyncMessage,
};
use syncwatch_shared::time::SystemClock;
use tokio::{
    sync::{Mutex, mpsc, oneshot},
    task::JoinHandle,
};
use tokio_tungstenite::{connect_async, tungstenite::Message};

/// Helper struct to manage the in-process server lifecycle
struct TestServer {
    port: u16,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl TestServer {
    async fn start() -> Self {
        let config = ServerConfig {
            tick_interval: Duration::from_secs(60),
            ..ServerConfig::default()
        };
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let server = build_server(&config, Arc::new(SystemClock));
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            server
                .serve(listener, async move {
                    let _ = shutdown_rx.await;
                })
                .await
                .unwrap();
        });

        TestServer {
            port,
            shutdown: Some(shutdown_tx),
            handle,
        }
    }

    fn url(&self) -> String {
        format!("ws://127.0.0.1:{}/ws", self.port)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        self.handle.abort();
    }
}

async fn next_sync<S>(stream: &mut S) -> SyncMessage
where
    S: Stream<Item = Result<Message, tokio_tungstenite::tungstenite::Error>> + Unpin,
{
    loop {
        let msg = tokio::time::timeout(Duration::from_secs(2), stream.next())
            .await
            .expect("timed out waiting for sync")
            .expect("stream closed")
            .unwrap();
        if let Message::Text(text) = msg {
            return serde_json::from_str(text.as_str()).unwrap();
        }
    }
}

#[tokio::test]
async fn test_typed_commands_reach_other_viewers() {
    // テスト項目: 入力したコマンドが同じルームの他の視聴者に sync として届く
    // given (前提条件):
    let server = TestServer::start().await;
    let (mut observer, _) = connect_async(room_endpoint(&server.url(), "movie-night"))
        .await
        .unwrap();
    next_sync(&mut observer).await;

    let playback = Arc::new(Mutex::new(LocalPlayback::new()));
    let (input_tx, mut input_rx) = mpsc::unbounded_channel();
    input_tx.send("video https://x/video.mp4".to_string()).unwrap();
    input_tx.send("seek 30".to_string()).unwrap();
    input_tx.send("quit".to_string()).unwrap();

    // when (操作):
    let result = run_client_session(&server.url(), "movie-night", &mut input_rx, &playback).await;

    // then (期待する結果):
    assert_eq!(result, Ok(()));
    let video = next_sync(&mut observer).await;
    assert_eq!(video.video_url, "https://x/video.mp4");
    assert!(video.is_playing);
    let seek = next_sync(&mut observer).await;
    assert_eq!(seek.leader_time, 30.0);
    assert!(seek.is_playing);
}

#[tokio::test]
async fn test_invalid_room_is_not_retried() {
    // テスト項目: 無効なルーム ID は 400 で拒否され、再接続しない
    // given (前提条件):
    let server = TestServer::start().await;
    let playback = Arc::new(Mutex::new(LocalPlayback::new()));
    let (_input_tx, mut input_rx) = mpsc::unbounded_channel();

    // when (操作):
    let result = run_with_reconnect(
        &server.url(),
        "   ",
        &mut input_rx,
        &playback,
        Duration::from_secs(60),
    )
    .await;

    // then (期待する結果):
    assert_eq!(result, Err(ClientError::HandshakeRejected { status: 400 }));
}

#[tokio::test]
async fn test_gives_up_after_max_attempts() {
    // テスト項目: サーバーに繋がらない場合、上限回数で諦める
    // given (前提条件):
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let playback = Arc::new(Mutex::new(LocalPlayback::new()));
    let (_input_tx, mut input_rx) = mpsc::unbounded_channel();

    // when (操作):
    let result = run_with_reconnect(
        &format!("ws://127.0.0.1:{}/ws", port),
        "movie-night",
        &mut input_rx,
        &playback,
        Duration::from_millis(10),
    )
    .await;

    // then (期待する結果):
    assert_eq!(result, Err(ClientError::ReconnectExhausted(5)));
}
