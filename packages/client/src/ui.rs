//! UI utilities for the client.

use std::io::Write;

/// Redisplay the prompt after receiving a message
pub fn redisplay_prompt(lobby: &str) {
    print!("{}> ", lobby);
    std::io::stdout().flush().ok();
}
