//! Message Repository Implementation
//!
//! Direct messages with keyset pagination over a conversation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::keyset::Keyset;
use crate::domain::{CursorPagination, Message, MessageRepository};
use crate::shared::error::AppError;

/// PostgreSQL message repository implementation.
pub struct PgMessageRepository {
    pool: PgPool,
}

impl PgMessageRepository {
    /// Creates a new PgMessageRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Which side of a message a foreign key violation points at.
fn missing_participant(constraint: Option<&str>) -> AppError {
    match constraint {
        Some("messages_sender_id_fkey") => AppError::NotFound("Sender not found".to_string()),
        _ => AppError::NotFound("Receiver not found".to_string()),
    }
}

/// Internal row type for message queries.
#[derive(Debug, sqlx::FromRow)]
struct MessageRow {
    id: Uuid,
    sender_id: Uuid,
    receiver_id: Uuid,
    content: String,
    created_at: DateTime<Utc>,
}

impl MessageRow {
    /// Converts database row to domain Message entity.
    fn into_message(self) -> Message {
        Message {
            id: self.id,
            sender_id: self.sender_id,
            receiver_id: self.receiver_id,
            content: self.content,
            created_at: self.created_at,
        }
    }
}

#[async_trait]
impl MessageRepository for PgMessageRepository {
    async fn create(&self, message: &Message) -> Result<Message, AppError> {
        let row = sqlx::query_as::<_, MessageRow>(
            r#"
            INSERT INTO messages (id, sender_id, receiver_id, content)
            VALUES ($1, $2, $3, $4)
            RETURNING id, sender_id, receiver_id, content, created_at
            "#,
        )
        .bind(message.id)
        .bind(message.sender_id)
        .bind(message.receiver_id)
        .bind(&message.content)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                missing_participant(db_err.constraint())
            }
            _ => AppError::Database(e),
        })?;

        Ok(row.into_message())
    }

    /// Find a message by its ID.
    ///
    /// Returns None if the message does not exist.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Message>, AppError> {
        let row = sqlx::query_as::<_, MessageRow>(
            r#"
            SELECT id, sender_id, receiver_id, content, created_at
            FROM messages
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_message()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM messages WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Uses the `(LEAST, GREATEST)` conversation index so both directions
    /// come from a single range scan.
    async fn find_conversation(
        &self,
        user_a: Uuid,
        user_b: Uuid,
        page: CursorPagination,
    ) -> Result<Vec<Message>, AppError> {
        let keyset = Keyset::new(page);
        let sql = format!(
            r#"
            SELECT id, sender_id, receiver_id, content, created_at
            FROM messages
            WHERE LEAST(sender_id, receiver_id) = LEAST($1::uuid, $2::uuid)
              AND GREATEST(sender_id, receiver_id) = GREATEST($1::uuid, $2::uuid)
              AND ($3::uuid IS NULL OR id < $3)
              AND ($4::uuid IS NULL OR id > $4)
            ORDER BY id {order}
            LIMIT $5
            "#,
            order = keyset.order(),
        );
        let rows = sqlx::query_as::<_, MessageRow>(&sql)
            .bind(user_a)
            .bind(user_b)
            .bind(keyset.after)
            .bind(keyset.before)
            .bind(keyset.limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(keyset.finish(rows.into_iter().map(|r| r.into_message()).collect()))
    }
}
