//! Error types for the play-testing client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server refused the connection (player capacity reached)
    #[error("Server refused the connection: {0}")]
    Rejected(String),

    /// The server answered the join request with an error
    #[error("Could not join lobby '{0}' (name invalid, game mismatch, lobby full or too many lobbies)")]
    JoinRejected(String),

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),
}
