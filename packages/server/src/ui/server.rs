//! Server execution logic.

use std::{sync::Arc, time::Duration};

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::usecase::{
    GetLobbiesUseCase, GetLobbyDetailUseCase, GetServerStatusUseCase, LifecycleController,
};

use super::{
    handler::{get_lobbies, get_lobby_detail, get_status, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Lobby relay server
///
/// This struct encapsulates the server configuration and provides methods to run the server.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     lifecycle,
///     get_server_status_usecase,
///     get_lobbies_usecase,
///     get_lobby_detail_usecase,
///     Some(Duration::from_secs(12)),
/// );
/// server.run("127.0.0.1".to_string(), 3000).await?;
/// ```
pub struct Server {
    /// LifecycleController（接続・受信・切断のイベント処理）
    lifecycle: Arc<LifecycleController>,
    /// GetServerStatusUseCase（サーバーステータス取得のユースケース）
    get_server_status_usecase: Arc<GetServerStatusUseCase>,
    /// GetLobbiesUseCase（ロビー一覧取得のユースケース）
    get_lobbies_usecase: Arc<GetLobbiesUseCase>,
    /// GetLobbyDetailUseCase（ロビー詳細取得のユースケース）
    get_lobby_detail_usecase: Arc<GetLobbyDetailUseCase>,
    /// Idle time before a connection is closed (`None` disables it)
    player_timeout: Option<Duration>,
}

impl Server {
    /// Create a new Server instance
    ///
    /// # Arguments
    ///
    /// * `lifecycle` - Connection lifecycle controller
    /// * `get_server_status_usecase` - UseCase for getting server status
    /// * `get_lobbies_usecase` - UseCase for getting the lobby list
    /// * `get_lobby_detail_usecase` - UseCase for getting lobby detail
    /// * `player_timeout` - Idle time before a connection is closed
    pub fn new(
        lifecycle: Arc<LifecycleController>,
        get_server_status_usecase: Arc<GetServerStatusUseCase>,
        get_lobbies_usecase: Arc<GetLobbiesUseCase>,
        get_lobby_detail_usecase: Arc<GetLobbyDetailUseCase>,
        player_timeout: Option<Duration>,
    ) -> Self {
        Self {
            lifecycle,
            get_server_status_usecase,
            get_lobbies_usecase,
            get_lobby_detail_usecase,
            player_timeout,
        }
    }

    /// Build the router with all endpoints.
    pub fn router(self) -> Router {
        let app_state = Arc::new(AppState {
            lifecycle: self.lifecycle,
            get_server_status_usecase: self.get_server_status_usecase,
            get_lobbies_usecase: self.get_lobbies_usecase,
            get_lobby_detail_usecase: self.get_lobby_detail_usecase,
            player_timeout: self.player_timeout,
        });

        Router::new()
            // WebSocket エンドポイント
            .route("/game_server", get(websocket_handler))
            // HTTP エンドポイント
            .route("/status", get(get_status))
            .route("/lobbies", get(get_lobbies))
            .route("/lobbies/{name}", get(get_lobby_detail))
            .route("/api/health", get(health_check))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Run the lobby relay server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 3000)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.router();

        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        // Start the server
        tracing::info!("Lobby relay server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/game_server", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        // Set up graceful shutdown signal handler
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
