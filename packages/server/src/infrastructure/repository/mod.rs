//! Repository 実装
//!
//! - `inmemory`: プロセス内メモリに状態を保持する実装

pub mod inmemory;

pub use inmemory::InMemoryLobbyRepository;
