//! Data Transfer Objects (DTOs) for the relay.
//!
//! DTOs are organized by protocol:
//! - `websocket`: WebSocket message DTOs
//! - `http`: HTTP status endpoint response DTOs

pub mod conversion;
pub mod http;
pub mod websocket;
