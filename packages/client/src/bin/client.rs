//! Interactive play-testing client for the Hiroba lobby relay.
//!
//! Joins (or creates) a lobby for a game and sends each input line as a
//! `data` message. JSON input is sent as the payload as-is; other text is
//! wrapped as `{"text": ...}`. `/init <json>` stores the lobby snapshot when
//! this client is the leader.
//! Automatically reconnects on disconnection (max 5 attempts with 5 second interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-client -- --lobby abc --game pong
//! cargo run --bin hiroba-client -- -l abc -g increment -u ws://127.0.0.1:3000/game_server
//! ```

use clap::Parser;

use hiroba_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "hiroba-client")]
#[command(about = "Play-testing client for the Hiroba lobby relay", long_about = None)]
struct Args {
    /// Lobby to create or join
    #[arg(short = 'l', long)]
    lobby: String,

    /// Game tag declared when joining
    #[arg(short = 'g', long)]
    game: String,

    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:3000/game_server")]
    url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger("hiroba_client", env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    // Run the client
    if let Err(e) = hiroba_client::run_client(args.url, args.lobby, args.game).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
