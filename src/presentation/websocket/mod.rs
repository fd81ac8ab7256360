//! WebSocket Gateway
//!
//! Real-time direct messages and presence over WebSocket connections.

pub mod gateway;
pub mod handler;
pub mod messages;
pub mod session;

pub use gateway::Gateway;
pub use handler::{authenticate_handshake, on_client_text, on_connect, on_disconnect, ws_handler};
pub use messages::{
    ErrorPayload, GatewayReceive, MessagePayload, PresencePayload, ReadyPayload, ServerEvent,
};
pub use session::SessionState;
