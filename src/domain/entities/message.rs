//! Direct message entity and repository trait.
//!
//! Maps to the `messages` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::CursorPagination;
use crate::shared::error::AppError;

/// A direct message between two users.
///
/// Maps to the `messages` table:
/// - id: UUID PRIMARY KEY (v7)
/// - sender_id / receiver_id: UUID NOT NULL REFERENCES users(id)
/// - content: VARCHAR(1000) NOT NULL
/// - created_at: TIMESTAMPTZ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn new(sender_id: Uuid, receiver_id: Uuid, content: String) -> Self {
        Self {
            id: Uuid::now_v7(),
            sender_id,
            receiver_id,
            content,
            created_at: Utc::now(),
        }
    }

    /// Whether `user_id` is one of the two participants.
    pub fn involves(&self, user_id: Uuid) -> bool {
        self.sender_id == user_id || self.receiver_id == user_id
    }
}

/// Repository trait for Message data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageRepository: Send + Sync {
    async fn create(&self, message: &Message) -> Result<Message, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Message>, AppError>;

    /// Returns `false` when the message did not exist.
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;

    /// Messages exchanged between `user_a` and `user_b` in either direction,
    /// newest first.
    async fn find_conversation(
        &self,
        user_a: Uuid,
        user_b: Uuid,
        page: CursorPagination,
    ) -> Result<Vec<Message>, AppError>;
}
