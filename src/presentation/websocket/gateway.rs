//! WebSocket Gateway
//!
//! Registry of authenticated sessions and the per-user rooms they belong to.
//! A session joins exactly one room, keyed by its user id; a user with
//! several sessions has several members in that room.

use std::collections::HashSet;
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::mpsc;
use uuid::Uuid;

use super::messages::ServerEvent;
use crate::application::dto::MessageDto;
use crate::infrastructure::metrics;

/// Connected session with message sender
pub struct ConnectedSession {
    pub user_id: Uuid,
    pub session_id: String,
    pub sender: mpsc::UnboundedSender<ServerEvent>,
}

/// WebSocket gateway managing all connections
pub struct Gateway {
    /// Active sessions by session_id
    sessions: DashMap<String, Arc<ConnectedSession>>,
    /// Room per user id, holding that user's session ids
    rooms: DashMap<Uuid, Vec<String>>,
    /// Server ping interval in milliseconds
    heartbeat_interval_ms: u64,
}

impl Gateway {
    pub fn new(heartbeat_interval_ms: u64) -> Self {
        Self {
            sessions: DashMap::new(),
            rooms: DashMap::new(),
            heartbeat_interval_ms,
        }
    }

    /// Get the heartbeat interval
    pub fn heartbeat_interval(&self) -> u64 {
        self.heartbeat_interval_ms
    }

    /// Register a session and add it to its user's room
    pub fn join(
        &self,
        session_id: String,
        user_id: Uuid,
        sender: mpsc::UnboundedSender<ServerEvent>,
    ) {
        let session = Arc::new(ConnectedSession {
            user_id,
            session_id: session_id.clone(),
            sender,
        });

        self.sessions.insert(session_id.clone(), session);
        self.rooms.entry(user_id).or_default().push(session_id.clone());
        metrics::set_gateway_sessions(self.sessions.len());

        tracing::info!(
            user_id = %user_id,
            session_id = %session_id,
            "Session joined room"
        );
    }

    /// Unregister a session. Empty rooms are dropped.
    pub fn leave(&self, session_id: &str) -> Option<Arc<ConnectedSession>> {
        let (_, session) = self.sessions.remove(session_id)?;

        if let Some(mut members) = self.rooms.get_mut(&session.user_id) {
            members.retain(|s| s != session_id);
        }
        self.rooms
            .remove_if(&session.user_id, |_, members| members.is_empty());
        metrics::set_gateway_sessions(self.sessions.len());

        tracing::info!(
            user_id = %session.user_id,
            session_id = %session_id,
            "Session left room"
        );
        Some(session)
    }

    /// Send event directly to a session
    pub fn send_to_session(&self, session_id: &str, event: ServerEvent) -> bool {
        match self.sessions.get(session_id) {
            Some(session) => session.sender.send(event).is_ok(),
            None => false,
        }
    }

    /// Send an event to every session in the given rooms, once per session.
    ///
    /// Returns the number of sessions reached.
    pub fn emit_to_rooms(&self, user_ids: &[Uuid], event: ServerEvent) -> usize {
        let mut seen = HashSet::new();
        let mut targets = Vec::new();

        for user_id in user_ids {
            if let Some(members) = self.rooms.get(user_id) {
                for session_id in members.value() {
                    if seen.insert(session_id.clone()) {
                        targets.push(session_id.clone());
                    }
                }
            }
        }

        targets
            .iter()
            .filter(|session_id| self.send_to_session(session_id, event.clone()))
            .count()
    }

    /// Send an event to every session except `session_id`.
    pub fn broadcast_except(&self, session_id: &str, event: ServerEvent) -> usize {
        let targets: Vec<Arc<ConnectedSession>> = self
            .sessions
            .iter()
            .filter(|entry| entry.key() != session_id)
            .map(|entry| entry.value().clone())
            .collect();

        targets
            .iter()
            .filter(|session| session.sender.send(event.clone()).is_ok())
            .count()
    }

    /// Fan a stored direct message out to the sender's and receiver's rooms.
    pub fn deliver_message(&self, message: MessageDto) -> usize {
        let rooms = [message.sender_id, message.receiver_id];
        let message_id = message.id;
        let reached = self.emit_to_rooms(&rooms, ServerEvent::Message(message.into()));

        tracing::debug!(message_id = %message_id, sessions = reached, "Message fanned out");
        reached
    }

    /// Get session count
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Number of sessions in a user's room
    pub fn room_size(&self, user_id: Uuid) -> usize {
        self.rooms.get(&user_id).map(|m| m.len()).unwrap_or(0)
    }

    /// Check if user is online (has at least one session)
    pub fn is_online(&self, user_id: Uuid) -> bool {
        self.room_size(user_id) > 0
    }
}
