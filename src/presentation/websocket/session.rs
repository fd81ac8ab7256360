//! WebSocket Session Management

use std::time::Instant;

use uuid::Uuid;

/// Per-connection state owned by the connection task
#[derive(Debug)]
pub struct SessionState {
    pub user_id: Uuid,
    pub session_id: String,
    pub last_heartbeat: Instant,
}

impl SessionState {
    /// The session id is fixed at handshake time, the user from the token.
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            session_id: Uuid::new_v4().to_string(),
            last_heartbeat: Instant::now(),
        }
    }

    pub fn heartbeat(&mut self) {
        self.last_heartbeat = Instant::now();
    }

    pub fn is_alive(&self, timeout_ms: u64) -> bool {
        self.last_heartbeat.elapsed().as_millis() < timeout_ms as u128
    }
}
