//! End-to-end tests for the lobby relay protocol.
//!
//! Each test starts the server in-process on an ephemeral port and drives it
//! with real WebSocket clients (`tokio-tungstenite`) and HTTP requests
//! (`reqwest`) against the status endpoints.

use std::{collections::HashMap, net::SocketAddr, sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use hiroba_server::{
    config::ServerConfig,
    domain::{GameTransformRegistry, RelayState},
    infrastructure::{
        message_pusher::WebSocketMessagePusher, repository::InMemoryLobbyRepository,
    },
    ui::Server,
    usecase::{
        ConnectPlayerUseCase, DisconnectPlayerUseCase, GetLobbiesUseCase, GetLobbyDetailUseCase,
        GetServerStatusUseCase, LifecycleController, RouteMessageUseCase,
    },
};
use hiroba_shared::time::FixedClock;
use serde_json::{Value, json};
use tokio::{net::TcpStream, sync::Mutex};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async,
    tungstenite::{Error as WsError, Message},
};

const RECV_TIMEOUT: Duration = Duration::from_secs(2);

/// Helper struct to manage an in-process server
struct TestServer {
    addr: SocketAddr,
}

impl TestServer {
    /// Start a test server with the given configuration on an ephemeral port
    async fn start(config: ServerConfig) -> Self {
        let state = Arc::new(Mutex::new(RelayState::new(config.limits())));
        let repository = Arc::new(InMemoryLobbyRepository::new(
            state,
            Arc::new(FixedClock::new(1_672_531_200_000)),
        ));
        let pusher = Arc::new(WebSocketMessagePusher::new(Arc::new(Mutex::new(
            HashMap::new(),
        ))));
        let lifecycle = Arc::new(LifecycleController::new(
            Arc::new(ConnectPlayerUseCase::new(repository.clone(), pusher.clone())),
            Arc::new(RouteMessageUseCase::new(
                repository.clone(),
                pusher.clone(),
                Arc::new(GameTransformRegistry::with_defaults()),
            )),
            Arc::new(DisconnectPlayerUseCase::new(repository.clone(), pusher)),
        ));
        let app = Server::new(
            lifecycle,
            Arc::new(GetServerStatusUseCase::new(repository.clone())),
            Arc::new(GetLobbiesUseCase::new(repository.clone())),
            Arc::new(GetLobbyDetailUseCase::new(repository)),
            config.player_timeout,
        )
        .router();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        TestServer { addr }
    }

    async fn with_defaults() -> Self {
        Self::start(ServerConfig {
            player_timeout: None,
            ..ServerConfig::default()
        })
        .await
    }

    /// Get the WebSocket URL for this server
    fn url(&self) -> String {
        format!("ws://{}/game_server", self.addr)
    }

    async fn get_json(&self, path: &str) -> (u16, Value) {
        let response = reqwest::get(format!("http://{}{}", self.addr, path))
            .await
            .unwrap();
        let status = response.status().as_u16();
        let body = response.json::<Value>().await.unwrap_or(Value::Null);
        (status, body)
    }

    /// Poll `/status` until the live player count matches
    async fn wait_for_players(&self, expected: u64) -> Value {
        let deadline = tokio::time::Instant::now() + RECV_TIMEOUT;
        loop {
            let (_, status) = self.get_json("/status").await;
            if status["players"] == json!(expected) || tokio::time::Instant::now() > deadline {
                return status;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    }
}

/// Helper struct wrapping one player's WebSocket connection
struct TestClient {
    ws: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl TestClient {
    /// Connect and consume the `connected` notice
    async fn connect(server: &TestServer) -> Self {
        let (ws, _) = connect_async(server.url()).await.unwrap();
        let mut client = TestClient { ws };
        assert_eq!(client.recv().await, json!({"type": "connected", "data": {}}));
        client
    }

    async fn send(&mut self, message: Value) {
        self.ws
            .send(Message::Text(message.to_string().into()))
            .await
            .unwrap();
    }

    async fn join(&mut self, lobby: &str, game: &str) -> Value {
        self.send(json!({"type": "data", "lobby": lobby, "game": game}))
            .await;
        self.recv().await
    }

    /// Receive the next text frame as JSON
    async fn recv(&mut self) -> Value {
        self.try_recv(RECV_TIMEOUT)
            .await
            .expect("Timed out waiting for a message")
    }

    async fn try_recv(&mut self, wait: Duration) -> Option<Value> {
        loop {
            let frame = tokio::time::timeout(wait, self.ws.next()).await.ok()??;
            match frame.ok()? {
                Message::Text(text) => return Some(serde_json::from_str(text.as_str()).unwrap()),
                Message::Close(_) => return None,
                _ => continue,
            }
        }
    }

    /// Assert that nothing arrives for a short while
    async fn expect_silence(&mut self) {
        assert_eq!(self.try_recv(Duration::from_millis(200)).await, None);
    }
}

#[tokio::test]
async fn test_create_join_and_relay_both_ways() {
    // テスト項目: 作成・参加の後、リーダーとフォロワーの間でメッセージが中継される
    // given (前提条件):
    let server = TestServer::with_defaults().await;
    let mut alice = TestClient::connect(&server).await;
    let mut bob = TestClient::connect(&server).await;

    // when (操作):
    let alice_ack = alice.join("abc", "pong").await;
    let bob_ack = bob.join("abc", "pong").await;
    let bob_snapshot = bob.recv().await;

    // then (期待する結果):
    assert_eq!(
        alice_ack,
        json!({"type": "success", "data": {"is_leader": true, "player_id": 1}, "lobby": "abc"})
    );
    assert_eq!(
        bob_ack,
        json!({"type": "success", "data": {"is_leader": false, "player_id": 2}, "lobby": "abc"})
    );
    assert_eq!(bob_snapshot, json!({"type": "data", "data": {}}));

    let from_leader = json!({"type": "data", "lobby": "abc", "game": "pong", "data": {"ball": [3, 4]}});
    alice.send(from_leader.clone()).await;
    assert_eq!(bob.recv().await, from_leader);
    alice.expect_silence().await;

    let from_follower = json!({"type": "data", "lobby": "abc", "game": "pong", "data": {"paddle": 7}});
    bob.send(from_follower.clone()).await;
    assert_eq!(alice.recv().await, from_follower);
    bob.expect_silence().await;
}

#[tokio::test]
async fn test_initialization_snapshot_is_replayed_on_join() {
    // テスト項目: リーダーの initialization_data は後から参加したプレイヤーにだけ届く
    // given (前提条件):
    let server = TestServer::with_defaults().await;
    let mut alice = TestClient::connect(&server).await;
    let mut bob = TestClient::connect(&server).await;
    alice.join("abc", "pong").await;
    bob.join("abc", "pong").await;
    bob.recv().await;

    // when (操作):
    alice
        .send(json!({"type": "initialization_data", "data": {"seed": 42}}))
        .await;
    let mut charlie = TestClient::connect(&server).await;
    let charlie_ack = charlie.join("abc", "pong").await;

    // then (期待する結果):
    assert_eq!(charlie_ack["data"]["is_leader"], json!(false));
    assert_eq!(
        charlie.recv().await,
        json!({"type": "data", "data": {"seed": 42}})
    );
    bob.expect_silence().await;
}

#[tokio::test]
async fn test_leader_disconnect_promotes_next_member() {
    // テスト項目: リーダーが切断すると次のメンバーに昇格通知が届き、中継先が切り替わる
    // given (前提条件):
    let server = TestServer::with_defaults().await;
    let mut alice = TestClient::connect(&server).await;
    let mut bob = TestClient::connect(&server).await;
    let mut charlie = TestClient::connect(&server).await;
    alice.join("abc", "pong").await;
    bob.join("abc", "pong").await;
    bob.recv().await;
    charlie.join("abc", "pong").await;
    charlie.recv().await;

    // when (操作):
    drop(alice);

    // then (期待する結果):
    assert_eq!(
        bob.recv().await,
        json!({"type": "success", "data": {"is_leader": true}, "lobby": "abc"})
    );
    charlie
        .send(json!({"type": "data", "data": {"move": "up"}}))
        .await;
    assert_eq!(bob.recv().await, json!({"type": "data", "data": {"move": "up"}}));

    let (_, detail) = server.get_json("/lobbies/abc").await;
    assert_eq!(detail["leader"], json!(2));
    assert_eq!(detail["members"], json!([2, 3]));
}

#[tokio::test]
async fn test_game_mismatch_is_rejected() {
    // テスト項目: ゲームタグが異なる参加要求には error が返り、ロビーは変わらない
    // given (前提条件):
    let server = TestServer::with_defaults().await;
    let mut alice = TestClient::connect(&server).await;
    let mut bob = TestClient::connect(&server).await;
    alice.join("abc", "pong").await;

    // when (操作):
    let ack = bob.join("abc", "chess").await;

    // then (期待する結果):
    assert_eq!(ack, json!({"type": "error", "data": {}}));
    let (_, lobbies) = server.get_json("/lobbies").await;
    assert_eq!(lobbies, json!({"lobbies": {"abc": 1}}));

    // 拒否された後も同じ接続で参加し直せる
    let retry = bob.join("abc", "pong").await;
    assert_eq!(retry["type"], json!("success"));
}

#[tokio::test]
async fn test_full_lobby_is_rejected() {
    // テスト項目: 満員のロビーへの参加要求には error が返る
    // given (前提条件):
    let server = TestServer::start(ServerConfig {
        max_players_per_lobby: 2,
        player_timeout: None,
        ..ServerConfig::default()
    })
    .await;
    let mut alice = TestClient::connect(&server).await;
    let mut bob = TestClient::connect(&server).await;
    let mut charlie = TestClient::connect(&server).await;
    alice.join("abc", "pong").await;
    bob.join("abc", "pong").await;

    // when (操作):
    let ack = charlie.join("abc", "pong").await;

    // then (期待する結果):
    assert_eq!(ack, json!({"type": "error", "data": {}}));
}

#[tokio::test]
async fn test_connection_over_capacity_is_refused() {
    // テスト項目: 同時接続数の上限を超えた接続は 503 で拒否される
    // given (前提条件):
    let server = TestServer::start(ServerConfig {
        max_players: 1,
        player_timeout: None,
        ..ServerConfig::default()
    })
    .await;
    let _alice = TestClient::connect(&server).await;

    // when (操作):
    let result = connect_async(server.url()).await;

    // then (期待する結果):
    match result {
        Err(WsError::Http(response)) => assert_eq!(response.status().as_u16(), 503),
        Err(e) => panic!("Unexpected error: {}", e),
        Ok(_) => panic!("Connection should have been refused"),
    }
    let (_, status) = server.get_json("/status").await;
    assert_eq!(status, json!({"players": 1, "lobbies": 0, "next_player_id": 2}));
}

#[tokio::test]
async fn test_status_endpoints() {
    // テスト項目: ステータス・ロビー一覧・ロビー詳細・ヘルスチェックが取得できる
    // given (前提条件):
    let server = TestServer::with_defaults().await;
    let mut alice = TestClient::connect(&server).await;
    let mut bob = TestClient::connect(&server).await;
    let _idle = TestClient::connect(&server).await;
    alice.join("abc", "pong").await;
    bob.join("xyz", "chess").await;

    // when (操作):
    let (_, status) = server.get_json("/status").await;
    let (_, lobbies) = server.get_json("/lobbies").await;
    let (detail_code, detail) = server.get_json("/lobbies/xyz").await;
    let (missing_code, _) = server.get_json("/lobbies/missing").await;
    let (_, health) = server.get_json("/api/health").await;

    // then (期待する結果):
    assert_eq!(status, json!({"players": 3, "lobbies": 2, "next_player_id": 4}));
    assert_eq!(lobbies, json!({"lobbies": {"abc": 1, "xyz": 1}}));
    assert_eq!(detail_code, 200);
    assert_eq!(
        detail,
        json!({
            "name": "xyz",
            "game": "chess",
            "leader": 2,
            "members": [2],
            "created_at": "2023-01-01T00:00:00.000Z",
        })
    );
    assert_eq!(missing_code, 404);
    assert_eq!(health, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_last_member_leaving_closes_lobby() {
    // テスト項目: 最後のメンバーが切断するとロビーが消え、接続数も減る
    // given (前提条件):
    let server = TestServer::with_defaults().await;
    let mut alice = TestClient::connect(&server).await;
    alice.join("abc", "pong").await;

    // when (操作):
    drop(alice);

    // then (期待する結果):
    let status = server.wait_for_players(0).await;
    assert_eq!(status, json!({"players": 0, "lobbies": 0, "next_player_id": 2}));
}

#[tokio::test]
async fn test_idle_player_is_disconnected() {
    // テスト項目: 一定時間メッセージを送らないプレイヤーは切断される
    // given (前提条件):
    let server = TestServer::start(ServerConfig {
        player_timeout: Some(Duration::from_millis(300)),
        ..ServerConfig::default()
    })
    .await;
    let mut alice = TestClient::connect(&server).await;

    // when (操作):
    let received = alice.try_recv(RECV_TIMEOUT).await;

    // then (期待する結果):
    assert_eq!(received, None);
    let status = server.wait_for_players(0).await;
    assert_eq!(status["players"], json!(0));
}

#[tokio::test]
async fn test_increment_game_normalizes_value() {
    // テスト項目: increment ゲームでは中継前に value が整数に正規化される
    // given (前提条件):
    let server = TestServer::with_defaults().await;
    let mut alice = TestClient::connect(&server).await;
    let mut bob = TestClient::connect(&server).await;
    alice.join("count", "increment").await;
    bob.join("count", "increment").await;
    bob.recv().await;

    // when (操作):
    alice
        .send(json!({"type": "data", "lobby": "count", "game": "increment", "data": {"note": "hi"}}))
        .await;

    // then (期待する結果):
    assert_eq!(
        bob.recv().await,
        json!({
            "type": "data",
            "lobby": "count",
            "game": "increment",
            "data": {"note": "hi", "value": 0},
        })
    );
}
