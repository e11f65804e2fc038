//! Request handlers.

mod http;
mod websocket;

pub use http::{get_lobbies, get_lobby_detail, get_status, health_check};
pub use websocket::websocket_handler;
