//! Follow entity and repository trait.
//!
//! Maps to the `follows` table. A follow is a directed edge
//! `follower_id -> followed_id`, unique per pair.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Follow {
    pub id: Uuid,
    pub follower_id: Uuid,
    pub followed_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Follow {
    pub fn new(follower_id: Uuid, followed_id: Uuid) -> Self {
        Self {
            id: Uuid::now_v7(),
            follower_id,
            followed_id,
            created_at: Utc::now(),
        }
    }
}

/// Repository trait for Follow data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FollowRepository: Send + Sync {
    /// Insert an edge. An existing edge yields `AppError::Conflict`.
    async fn create(&self, follow: &Follow) -> Result<Follow, AppError>;

    /// Remove an edge. Returns `false` when there was nothing to remove.
    async fn delete(&self, follower_id: Uuid, followed_id: Uuid) -> Result<bool, AppError>;

    async fn exists(&self, follower_id: Uuid, followed_id: Uuid) -> Result<bool, AppError>;

    /// Edges where `user_id` is the follower, newest first.
    async fn find_following(&self, user_id: Uuid) -> Result<Vec<Follow>, AppError>;

    /// Edges where `user_id` is followed, newest first.
    async fn find_followers(&self, user_id: Uuid) -> Result<Vec<Follow>, AppError>;
}
