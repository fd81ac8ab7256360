//! User Repository Implementation
//!
//! PostgreSQL implementation of the UserRepository trait.
//! Maps between the `users` table and the domain User entity.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{OffsetPagination, User, UserRepository, Visibility};
use crate::shared::error::AppError;

/// Database row representation of the users table.
#[derive(Debug, sqlx::FromRow)]
pub(super) struct UserRow {
    id: Uuid,
    name: Option<String>,
    username: String,
    email: String,
    password_hash: String,
    visibility: String,
    profile_picture: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    /// Convert database row to domain User entity.
    pub(super) fn into_user(self) -> User {
        User {
            id: self.id,
            name: self.name,
            username: self.username,
            email: self.email,
            password_hash: self.password_hash,
            visibility: Visibility::from_db(&self.visibility),
            profile_picture: self.profile_picture,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

const USER_COLUMNS: &str =
    "id, name, username, email, password_hash, visibility, profile_picture, created_at, updated_at";

/// PostgreSQL user repository implementation.
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, column: &str, value: &str) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE {column} = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(UserRow::into_user))
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(UserRow::into_user))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.find_one("email", email).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        self.find_one("username", username).await
    }

    async fn create(&self, user: &User) -> Result<User, AppError> {
        let sql = format!(
            r#"
            INSERT INTO users (id, name, username, email, password_hash, visibility, profile_picture)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {USER_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user.id)
            .bind(&user.name)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.visibility.as_str())
            .bind(&user.profile_picture)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                    AppError::Conflict("User with this email or username already exists".to_string())
                }
                _ => AppError::Database(e),
            })?;

        Ok(row.into_user())
    }

    async fn update(&self, user: &User) -> Result<User, AppError> {
        let sql = format!(
            r#"
            UPDATE users
            SET name = $2,
                password_hash = $3,
                visibility = $4,
                profile_picture = $5,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user.id)
            .bind(&user.name)
            .bind(&user.password_hash)
            .bind(user.visibility.as_str())
            .bind(&user.profile_picture)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", user.id)))?;

        Ok(row.into_user())
    }

    /// Reverse the counters the user's comments and reactions contributed,
    /// then delete the row. Posts, follows, reactions and messages go with
    /// it through `ON DELETE CASCADE`.
    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            UPDATE posts p
            SET qty_comments = GREATEST(p.qty_comments - c.total, 0)
            FROM (
                SELECT parent_post_id, COUNT(*)::int AS total
                FROM posts
                WHERE author_id = $1 AND parent_post_id IS NOT NULL
                GROUP BY parent_post_id
            ) c
            WHERE p.id = c.parent_post_id
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE posts p
            SET qty_likes = GREATEST(p.qty_likes - r.likes, 0),
                qty_retweets = GREATEST(p.qty_retweets - r.retweets, 0)
            FROM (
                SELECT post_id,
                       (COUNT(*) FILTER (WHERE action = 'LIKE'))::int AS likes,
                       (COUNT(*) FILTER (WHERE action = 'RETWEET'))::int AS retweets
                FROM reactions
                WHERE author_id = $1
                GROUP BY post_id
            ) r
            WHERE p.id = r.post_id
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("User with id {} not found", id)));
        }

        tx.commit().await?;
        Ok(())
    }

    async fn search_by_username(
        &self,
        fragment: &str,
        viewer: Uuid,
        page: OffsetPagination,
    ) -> Result<Vec<User>, AppError> {
        let sql = format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE strpos(lower(username), lower($1)) > 0
              AND (visibility <> 'HIDDEN' OR id = $2)
            ORDER BY username
            LIMIT $3 OFFSET $4
            "#
        );
        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .bind(fragment)
            .bind(viewer)
            .bind(i64::from(page.limit))
            .bind(i64::from(page.skip))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(UserRow::into_user).collect())
    }

    async fn find_recommended(
        &self,
        user_id: Uuid,
        page: OffsetPagination,
    ) -> Result<Vec<User>, AppError> {
        let sql = format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users u
            WHERE u.id <> $1
              AND u.visibility <> 'HIDDEN'
              AND NOT EXISTS (
                  SELECT 1 FROM follows f
                  WHERE f.follower_id = $1 AND f.followed_id = u.id
              )
            ORDER BY u.created_at DESC, u.id DESC
            LIMIT $2 OFFSET $3
            "#
        );
        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user_id)
            .bind(i64::from(page.limit))
            .bind(i64::from(page.skip))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(UserRow::into_user).collect())
    }
}
