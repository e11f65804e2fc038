//! Hiroba: a lobby-based message relay for networked games.
//!
//! Clients connect over WebSocket, create or join named lobbies, and exchange
//! messages through the lobby's leader: the leader's messages fan out to every
//! follower, and followers' messages go to the leader only.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
