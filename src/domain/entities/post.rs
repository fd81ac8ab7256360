//! Post entity and repository trait.
//!
//! Maps to the `posts` table. A post with a `parent_post_id` is a comment on
//! that post; both live in the same table and share one repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::User;
use crate::domain::value_objects::CursorPagination;
use crate::shared::error::AppError;

/// Represents a post or a comment.
///
/// Maps to the `posts` table:
/// - id: UUID PRIMARY KEY (v7)
/// - author_id: UUID NOT NULL REFERENCES users(id)
/// - content: VARCHAR(240) NOT NULL
/// - images: TEXT[] (storage keys, at most 4)
/// - parent_post_id: UUID NULL REFERENCES posts(id) ON DELETE CASCADE
/// - qty_likes / qty_retweets / qty_comments: INTEGER >= 0
/// - created_at: TIMESTAMPTZ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub images: Vec<String>,
    pub parent_post_id: Option<Uuid>,
    pub qty_likes: i32,
    pub qty_retweets: i32,
    pub qty_comments: i32,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// A new top-level post.
    pub fn new(author_id: Uuid, content: String, images: Vec<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            author_id,
            content,
            images,
            parent_post_id: None,
            qty_likes: 0,
            qty_retweets: 0,
            qty_comments: 0,
            created_at: Utc::now(),
        }
    }

    /// A new comment on `parent_post_id`.
    pub fn new_comment(
        author_id: Uuid,
        parent_post_id: Uuid,
        content: String,
        images: Vec<String>,
    ) -> Self {
        Self {
            parent_post_id: Some(parent_post_id),
            ..Self::new(author_id, content, images)
        }
    }

    pub fn is_comment(&self) -> bool {
        self.parent_post_id.is_some()
    }
}

/// Selects top-level posts or comments when listing by author.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostKind {
    Post,
    Comment,
}

/// A post joined with its author.
#[derive(Debug, Clone, PartialEq)]
pub struct PostWithAuthor {
    pub post: Post,
    pub author: User,
}

/// Repository trait for Post data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Insert a post. For a comment the parent's `qty_comments` is incremented
    /// in the same transaction; a missing parent yields `AppError::NotFound`.
    async fn create(&self, post: &Post) -> Result<Post, AppError>;

    /// Delete a post and, through the cascade, its comment tree. Deleting a
    /// comment decrements its parent's `qty_comments` once.
    async fn delete(&self, id: Uuid) -> Result<(), AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, AppError>;

    /// Top-level posts whose authors `viewer` may read, newest first.
    async fn find_feed(
        &self,
        viewer: Uuid,
        page: CursorPagination,
    ) -> Result<Vec<PostWithAuthor>, AppError>;

    /// Posts or comments written by `author_id`, newest first.
    async fn find_by_author(
        &self,
        author_id: Uuid,
        kind: PostKind,
        page: CursorPagination,
    ) -> Result<Vec<Post>, AppError>;

    /// Comments on `parent_id` whose authors `viewer` may read, newest first.
    async fn find_comments(
        &self,
        parent_id: Uuid,
        viewer: Uuid,
        page: CursorPagination,
    ) -> Result<Vec<PostWithAuthor>, AppError>;
}
