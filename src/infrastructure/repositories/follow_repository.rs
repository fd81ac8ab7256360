//! Follow Repository Implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{Follow, FollowRepository};
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct FollowRow {
    id: Uuid,
    follower_id: Uuid,
    followed_id: Uuid,
    created_at: DateTime<Utc>,
}

impl FollowRow {
    fn into_follow(self) -> Follow {
        Follow {
            id: self.id,
            follower_id: self.follower_id,
            followed_id: self.followed_id,
            created_at: self.created_at,
        }
    }
}

/// PostgreSQL follow repository implementation.
#[derive(Clone)]
pub struct PgFollowRepository {
    pool: PgPool,
}

impl PgFollowRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FollowRepository for PgFollowRepository {
    async fn create(&self, follow: &Follow) -> Result<Follow, AppError> {
        let row = sqlx::query_as::<_, FollowRow>(
            r#"
            INSERT INTO follows (id, follower_id, followed_id)
            VALUES ($1, $2, $3)
            RETURNING id, follower_id, followed_id, created_at
            "#,
        )
        .bind(follow.id)
        .bind(follow.follower_id)
        .bind(follow.followed_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::Conflict("You are already following this user".to_string())
            }
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                AppError::NotFound("User not found".to_string())
            }
            _ => AppError::Database(e),
        })?;

        Ok(row.into_follow())
    }

    async fn delete(&self, follower_id: Uuid, followed_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM follows WHERE follower_id = $1 AND followed_id = $2")
            .bind(follower_id)
            .bind(followed_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn exists(&self, follower_id: Uuid, followed_id: Uuid) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM follows WHERE follower_id = $1 AND followed_id = $2)",
        )
        .bind(follower_id)
        .bind(followed_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn find_following(&self, user_id: Uuid) -> Result<Vec<Follow>, AppError> {
        let rows = sqlx::query_as::<_, FollowRow>(
            r#"
            SELECT id, follower_id, followed_id, created_at
            FROM follows
            WHERE follower_id = $1
            ORDER BY id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(FollowRow::into_follow).collect())
    }

    async fn find_followers(&self, user_id: Uuid) -> Result<Vec<Follow>, AppError> {
        let rows = sqlx::query_as::<_, FollowRow>(
            r#"
            SELECT id, follower_id, followed_id, created_at
            FROM follows
            WHERE followed_id = $1
            ORDER BY id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(FollowRow::into_follow).collect())
    }
}
