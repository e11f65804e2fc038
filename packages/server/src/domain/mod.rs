//! Domain layer: lobby membership state machine and routing vocabulary.
//!
//! Everything here is synchronous and transport-agnostic except the two seam
//! traits (`LobbyRepository`, `MessagePusher`) implemented by the
//! infrastructure layer.

pub mod directory;
pub mod entity;
pub mod error;
pub mod message;
pub mod message_pusher;
pub mod registry;
pub mod repository;
pub mod state;
pub mod transform;
pub mod value_object;

pub use directory::{LeaveOutcome, LobbyDirectory};
pub use entity::{Lobby, Player};
pub use error::{ConnectError, LobbyError, MessagePushError, RelayError, TransformError};
pub use message::{InboundMessage, MessageKind, OutboundMessage};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use registry::ConnectionRegistry;
pub use repository::LobbyRepository;
pub use state::{Admission, Departure, Membership, RelayState, ServerStatus};
pub use transform::{GameTransform, GameTransformRegistry};
pub use value_object::{GameTag, LobbyLimits, LobbyName, PlayerId, Timestamp};

#[cfg(test)]
pub use message_pusher::MockMessagePusher;
