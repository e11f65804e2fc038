//! Interactive play-testing client for the Hiroba lobby relay.
//!
//! Joins a lobby, sends each input line as a `data` message and prints
//! whatever the relay forwards back.

mod domain;
pub mod error;
mod formatter;
mod runner;
mod session;
mod ui;

pub use runner::run_client;
