//! UseCase layer: application logic on top of the domain model.

pub mod connect_player;
pub mod disconnect_player;
pub mod error;
pub mod get_lobbies;
pub mod get_lobby_detail;
pub mod get_server_status;
pub mod lifecycle;
pub mod route_message;

pub use connect_player::ConnectPlayerUseCase;
pub use disconnect_player::DisconnectPlayerUseCase;
pub use error::GetLobbyDetailError;
pub use get_lobbies::GetLobbiesUseCase;
pub use get_lobby_detail::GetLobbyDetailUseCase;
pub use get_server_status::GetServerStatusUseCase;
pub use lifecycle::LifecycleController;
pub use route_message::{RouteMessageUseCase, RouteOutcome};
