//! Post Repository Implementation
//!
//! Posts and comments share the `posts` table. Comment counters are kept in
//! the same transaction as the row that changes them.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::keyset::Keyset;
use crate::domain::{
    CursorPagination, Post, PostKind, PostRepository, PostWithAuthor, User, Visibility,
};
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct PostRow {
    id: Uuid,
    author_id: Uuid,
    content: String,
    images: Vec<String>,
    parent_post_id: Option<Uuid>,
    qty_likes: i32,
    qty_retweets: i32,
    qty_comments: i32,
    created_at: DateTime<Utc>,
}

impl PostRow {
    fn into_post(self) -> Post {
        Post {
            id: self.id,
            author_id: self.author_id,
            content: self.content,
            images: self.images,
            parent_post_id: self.parent_post_id,
            qty_likes: self.qty_likes,
            qty_retweets: self.qty_retweets,
            qty_comments: self.qty_comments,
            created_at: self.created_at,
        }
    }
}

/// A post joined with its author's row.
#[derive(Debug, sqlx::FromRow)]
struct PostWithAuthorRow {
    #[sqlx(flatten)]
    post: PostRow,
    author_name: Option<String>,
    author_username: String,
    author_email: String,
    author_password_hash: String,
    author_visibility: String,
    author_profile_picture: Option<String>,
    author_created_at: DateTime<Utc>,
    author_updated_at: DateTime<Utc>,
}

impl PostWithAuthorRow {
    fn into_post_with_author(self) -> PostWithAuthor {
        let author = User {
            id: self.post.author_id,
            name: self.author_name,
            username: self.author_username,
            email: self.author_email,
            password_hash: self.author_password_hash,
            visibility: Visibility::from_db(&self.author_visibility),
            profile_picture: self.author_profile_picture,
            created_at: self.author_created_at,
            updated_at: self.author_updated_at,
        };
        PostWithAuthor {
            post: self.post.into_post(),
            author,
        }
    }
}

const POST_COLUMNS: &str = "p.id, p.author_id, p.content, p.images, p.parent_post_id, \
     p.qty_likes, p.qty_retweets, p.qty_comments, p.created_at";

const AUTHOR_COLUMNS: &str = "u.name AS author_name, u.username AS author_username, \
     u.email AS author_email, u.password_hash AS author_password_hash, \
     u.visibility AS author_visibility, u.profile_picture AS author_profile_picture, \
     u.created_at AS author_created_at, u.updated_at AS author_updated_at";

/// Author `u` is readable by the viewer bound as `$1`.
pub(super) const READABLE_BY_VIEWER: &str = r#"(
    u.id = $1
    OR u.visibility = 'PUBLIC'
    OR (u.visibility = 'PRIVATE' AND EXISTS (
        SELECT 1 FROM follows f WHERE f.follower_id = $1 AND f.followed_id = u.id
    ))
)"#;

/// The author or the parent post behind a foreign key violation.
fn missing_reference(constraint: Option<&str>) -> AppError {
    match constraint {
        Some("posts_author_id_fkey") => AppError::NotFound("Author not found".to_string()),
        _ => AppError::NotFound("Post not found".to_string()),
    }
}

/// PostgreSQL post repository implementation.
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    async fn create(&self, post: &Post) -> Result<Post, AppError> {
        let mut tx = self.pool.begin().await?;

        let sql = format!(
            r#"
            INSERT INTO posts AS p (id, author_id, content, images, parent_post_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {POST_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(post.id)
            .bind(post.author_id)
            .bind(&post.content)
            .bind(&post.images)
            .bind(post.parent_post_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                    missing_reference(db_err.constraint())
                }
                _ => AppError::Database(e),
            })?;

        if let Some(parent_id) = post.parent_post_id {
            sqlx::query("UPDATE posts SET qty_comments = qty_comments + 1 WHERE id = $1")
                .bind(parent_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(row.into_post())
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let parent = sqlx::query_scalar::<_, Option<Uuid>>(
            "DELETE FROM posts WHERE id = $1 RETURNING parent_post_id",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post with id {} not found", id)))?;

        if let Some(parent_id) = parent {
            sqlx::query(
                "UPDATE posts SET qty_comments = GREATEST(qty_comments - 1, 0) WHERE id = $1",
            )
            .bind(parent_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, AppError> {
        let sql = format!("SELECT {POST_COLUMNS} FROM posts p WHERE p.id = $1");
        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(PostRow::into_post))
    }

    async fn find_feed(
        &self,
        viewer: Uuid,
        page: CursorPagination,
    ) -> Result<Vec<PostWithAuthor>, AppError> {
        let keyset = Keyset::new(page);
        let sql = format!(
            r#"
            SELECT {POST_COLUMNS}, {AUTHOR_COLUMNS}
            FROM posts p
            JOIN users u ON u.id = p.author_id
            WHERE p.parent_post_id IS NULL
              AND {READABLE_BY_VIEWER}
              AND ($2::uuid IS NULL OR p.id < $2)
              AND ($3::uuid IS NULL OR p.id > $3)
            ORDER BY p.id {order}
            LIMIT $4
            "#,
            order = keyset.order(),
        );
        let rows = sqlx::query_as::<_, PostWithAuthorRow>(&sql)
            .bind(viewer)
            .bind(keyset.after)
            .bind(keyset.before)
            .bind(keyset.limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(keyset.finish(
            rows.into_iter()
                .map(PostWithAuthorRow::into_post_with_author)
                .collect(),
        ))
    }

    async fn find_by_author(
        &self,
        author_id: Uuid,
        kind: PostKind,
        page: CursorPagination,
    ) -> Result<Vec<Post>, AppError> {
        let keyset = Keyset::new(page);
        let kind_filter = match kind {
            PostKind::Post => "p.parent_post_id IS NULL",
            PostKind::Comment => "p.parent_post_id IS NOT NULL",
        };
        let sql = format!(
            r#"
            SELECT {POST_COLUMNS}
            FROM posts p
            WHERE p.author_id = $1
              AND {kind_filter}
              AND ($2::uuid IS NULL OR p.id < $2)
              AND ($3::uuid IS NULL OR p.id > $3)
            ORDER BY p.id {order}
            LIMIT $4
            "#,
            order = keyset.order(),
        );
        let rows = sqlx::query_as::<_, PostRow>(&sql)
            .bind(author_id)
            .bind(keyset.after)
            .bind(keyset.before)
            .bind(keyset.limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(keyset.finish(rows.into_iter().map(PostRow::into_post).collect()))
    }

    async fn find_comments(
        &self,
        parent_id: Uuid,
        viewer: Uuid,
        page: CursorPagination,
    ) -> Result<Vec<PostWithAuthor>, AppError> {
        let keyset = Keyset::new(page);
        let sql = format!(
            r#"
            SELECT {POST_COLUMNS}, {AUTHOR_COLUMNS}
            FROM posts p
            JOIN users u ON u.id = p.author_id
            WHERE p.parent_post_id = $2
              AND {READABLE_BY_VIEWER}
              AND ($3::uuid IS NULL OR p.id < $3)
              AND ($4::uuid IS NULL OR p.id > $4)
            ORDER BY p.id {order}
            LIMIT $5
            "#,
            order = keyset.order(),
        );
        let rows = sqlx::query_as::<_, PostWithAuthorRow>(&sql)
            .bind(viewer)
            .bind(parent_id)
            .bind(keyset.after)
            .bind(keyset.before)
            .bind(keyset.limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(keyset.finish(
            rows.into_iter()
                .map(PostWithAuthorRow::into_post_with_author)
                .collect(),
        ))
    }
}
