//! Lobby relay server for networked games.
//!
//! Players connect over WebSocket, name a lobby and a game, and have their
//! messages relayed between the lobby leader and its followers.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-server
//! cargo run --bin hiroba-server -- --host 0.0.0.0 --port 3000 --max-lobbies 32
//! ```

use std::{collections::HashMap, sync::Arc};

use clap::Parser;
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
use hiroba_shared::{logger::setup_logger, time::SystemClock};
use tokio::sync::Mutex;

#[derive(Parser, Debug)]
#[command(name = "hiroba-server")]
#[command(about = "Lobby relay server for networked games", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "3000")]
    port: u16,

    /// Maximum number of concurrently connected players
    #[arg(long, default_value = "256")]
    max_players: usize,

    /// Maximum number of lobbies
    #[arg(long, default_value = "16")]
    max_lobbies: usize,

    /// Maximum number of players in one lobby
    #[arg(long, default_value = "16")]
    max_players_per_lobby: usize,

    /// Seconds without a message before a player is disconnected (0 disables)
    #[arg(long, default_value = "12")]
    player_timeout: u64,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            max_players: args.max_players,
            max_lobbies: args.max_lobbies,
            max_players_per_lobby: args.max_players_per_lobby,
            player_timeout: ServerConfig::timeout_from_secs(args.player_timeout),
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger("hiroba_server", env!("CARGO_BIN_NAME"), "debug");

    let config = ServerConfig::from(Args::parse());
    tracing::info!("Starting with {:?}", config);

    // Initialize dependencies in order:
    // 1. Repository
    // 2. MessagePusher
    // 3. UseCases
    // 4. Server

    // 1. Create Repository (in-memory lobby state)
    let state = Arc::new(Mutex::new(RelayState::new(config.limits())));
    let repository = Arc::new(InMemoryLobbyRepository::new(
        state,
        Arc::new(SystemClock),
    ));

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher_clients = Arc::new(Mutex::new(HashMap::new()));
    let message_pusher = Arc::new(WebSocketMessagePusher::new(message_pusher_clients));

    // 3. Create UseCases
    let transforms = Arc::new(GameTransformRegistry::with_defaults());
    tracing::info!("Registered game transforms: {:?}", transforms);
    let lifecycle = Arc::new(LifecycleController::new(
        Arc::new(ConnectPlayerUseCase::new(
            repository.clone(),
            message_pusher.clone(),
        )),
        Arc::new(RouteMessageUseCase::new(
            repository.clone(),
            message_pusher.clone(),
            transforms,
        )),
        Arc::new(DisconnectPlayerUseCase::new(
            repository.clone(),
            message_pusher.clone(),
        )),
    ));
    let get_server_status_usecase = Arc::new(GetServerStatusUseCase::new(repository.clone()));
    let get_lobbies_usecase = Arc::new(GetLobbiesUseCase::new(repository.clone()));
    let get_lobby_detail_usecase = Arc::new(GetLobbyDetailUseCase::new(repository.clone()));

    // 4. Create and run the server
    let server = Server::new(
        lifecycle,
        get_server_status_usecase,
        get_lobbies_usecase,
        get_lobby_detail_usecase,
        config.player_timeout,
    );
    if let Err(e) = server.run(config.host, config.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
