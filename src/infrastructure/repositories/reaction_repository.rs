//! Reaction Repository Implementation
//!
//! Each insert or delete moves the post's `qty_likes` / `qty_retweets`
//! counter inside the same transaction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::post_repository::READABLE_BY_VIEWER;
use crate::domain::{Reaction, ReactionAction, ReactionRepository};
use crate::shared::error::AppError;

fn missing_reference(constraint: Option<&str>) -> AppError {
    match constraint {
        Some("reactions_author_id_fkey") => AppError::NotFound("User not found".to_string()),
        _ => AppError::NotFound("Post not found".to_string()),
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ReactionRow {
    id: Uuid,
    author_id: Uuid,
    post_id: Uuid,
    action: String,
    created_at: DateTime<Utc>,
}

impl ReactionRow {
    fn into_reaction(self) -> Result<Reaction, AppError> {
        let action = ReactionAction::from_db(&self.action).ok_or_else(|| {
            AppError::Internal(format!("Unknown reaction action '{}'", self.action))
        })?;

        Ok(Reaction {
            id: self.id,
            author_id: self.author_id,
            post_id: self.post_id,
            action,
            created_at: self.created_at,
        })
    }
}

/// PostgreSQL reaction repository implementation.
#[derive(Clone)]
pub struct PgReactionRepository {
    pool: PgPool,
}

impl PgReactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReactionRepository for PgReactionRepository {
    async fn create(&self, reaction: &Reaction) -> Result<Reaction, AppError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, ReactionRow>(
            r#"
            INSERT INTO reactions (id, author_id, post_id, action)
            VALUES ($1, $2, $3, $4)
            RETURNING id, author_id, post_id, action, created_at
            "#,
        )
        .bind(reaction.id)
        .bind(reaction.author_id)
        .bind(reaction.post_id)
        .bind(reaction.action.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::Conflict(format!("Post already has your {}", reaction.action))
            }
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                missing_reference(db_err.constraint())
            }
            _ => AppError::Database(e),
        })?;

        let column = reaction.action.counter_column();
        sqlx::query(&format!(
            "UPDATE posts SET {column} = {column} + 1 WHERE id = $1"
        ))
        .bind(reaction.post_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        row.into_reaction()
    }

    async fn delete(
        &self,
        author_id: Uuid,
        post_id: Uuid,
        action: ReactionAction,
    ) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "DELETE FROM reactions WHERE author_id = $1 AND post_id = $2 AND action = $3",
        )
        .bind(author_id)
        .bind(post_id)
        .bind(action.as_str())
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        let column = action.counter_column();
        sqlx::query(&format!(
            "UPDATE posts SET {column} = GREATEST({column} - 1, 0) WHERE id = $1"
        ))
        .bind(post_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(true)
    }

    async fn find_by_post(&self, post_id: Uuid) -> Result<Vec<Reaction>, AppError> {
        let rows = sqlx::query_as::<_, ReactionRow>(
            r#"
            SELECT id, author_id, post_id, action, created_at
            FROM reactions
            WHERE post_id = $1
            ORDER BY id DESC
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ReactionRow::into_reaction).collect()
    }

    async fn find_by_author(
        &self,
        viewer: Uuid,
        author_id: Uuid,
        action: Option<ReactionAction>,
    ) -> Result<Vec<Reaction>, AppError> {
        let sql = format!(
            r#"
            SELECT r.id, r.author_id, r.post_id, r.action, r.created_at
            FROM reactions r
            JOIN posts p ON p.id = r.post_id
            JOIN users u ON u.id = p.author_id
            WHERE r.author_id = $2
              AND ($3::text IS NULL OR r.action = $3)
              AND {readable}
            ORDER BY r.id DESC
            "#,
            readable = READABLE_BY_VIEWER,
        );

        let rows = sqlx::query_as::<_, ReactionRow>(&sql)
            .bind(viewer)
            .bind(author_id)
            .bind(action.map(|a| a.as_str()))
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(ReactionRow::into_reaction).collect()
    }
}
