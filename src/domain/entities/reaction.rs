//! Reaction entity and repository trait.
//!
//! Maps to the `reactions` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::AppError;

/// Kind of reaction. Each kind feeds one counter on the post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReactionAction {
    Like,
    Retweet,
}

impl ReactionAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Like => "LIKE",
            Self::Retweet => "RETWEET",
        }
    }

    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "LIKE" => Some(Self::Like),
            "RETWEET" => Some(Self::Retweet),
            _ => None,
        }
    }

    /// Name of the `posts` column this action counts into.
    pub fn counter_column(&self) -> &'static str {
        match self {
            Self::Like => "qty_likes",
            Self::Retweet => "qty_retweets",
        }
    }
}

impl std::fmt::Display for ReactionAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Represents a reaction on a post.
///
/// Maps to the `reactions` table:
/// - id: UUID PRIMARY KEY (v7)
/// - author_id: UUID NOT NULL REFERENCES users(id)
/// - post_id: UUID NOT NULL REFERENCES posts(id)
/// - action: TEXT NOT NULL ('LIKE' | 'RETWEET')
/// - created_at: TIMESTAMPTZ
///
/// UNIQUE (author_id, post_id, action): one reaction of each kind per user per post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    pub id: Uuid,
    pub author_id: Uuid,
    pub post_id: Uuid,
    pub action: ReactionAction,
    pub created_at: DateTime<Utc>,
}

impl Reaction {
    pub fn new(author_id: Uuid, post_id: Uuid, action: ReactionAction) -> Self {
        Self {
            id: Uuid::now_v7(),
            author_id,
            post_id,
            action,
            created_at: Utc::now(),
        }
    }
}

/// Repository trait for Reaction data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// Insert a reaction and bump the matching counter on the post.
    ///
    /// A second reaction with the same (author, post, action) yields
    /// `AppError::Conflict`; a missing post yields `AppError::NotFound`.
    async fn create(&self, reaction: &Reaction) -> Result<Reaction, AppError>;

    /// Remove a reaction and decrement the matching counter.
    /// Returns `false` when no such reaction existed.
    async fn delete(
        &self,
        author_id: Uuid,
        post_id: Uuid,
        action: ReactionAction,
    ) -> Result<bool, AppError>;

    async fn find_by_post(&self, post_id: Uuid) -> Result<Vec<Reaction>, AppError>;

    /// Reactions made by `author_id`, optionally of one kind, newest first.
    /// Reactions on posts whose author `viewer` may not read are left out.
    async fn find_by_author(
        &self,
        viewer: Uuid,
        author_id: Uuid,
        action: Option<ReactionAction>,
    ) -> Result<Vec<Reaction>, AppError>;
}
