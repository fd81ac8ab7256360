//! Follower Service
//!
//! Directed follow edges. Following is what unlocks PRIVATE content and,
//! depending on the messaging policy, direct messages.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::application::dto::{FollowDto, FollowResponse};
use crate::domain::services::VisibilityService;
use crate::domain::{Follow, FollowRepository, UserRepository};
use crate::shared::error::AppError;

/// Follower service trait
#[async_trait]
pub trait FollowerService: Send + Sync {
    async fn follow(&self, follower_id: Uuid, followed_id: Uuid) -> Result<FollowResponse, AppError>;

    async fn unfollow(&self, follower_id: Uuid, followed_id: Uuid) -> Result<(), AppError>;

    /// Edges where `user_id` is the follower
    async fn get_following(&self, user_id: Uuid) -> Result<Vec<FollowDto>, AppError>;

    /// Edges where `user_id` is followed
    async fn get_followers(&self, user_id: Uuid) -> Result<Vec<FollowDto>, AppError>;
}

/// FollowerService implementation
pub struct FollowerServiceImpl {
    follow_repo: Arc<dyn FollowRepository>,
    user_repo: Arc<dyn UserRepository>,
}

impl FollowerServiceImpl {
    pub fn new(follow_repo: Arc<dyn FollowRepository>, user_repo: Arc<dyn UserRepository>) -> Self {
        Self {
            follow_repo,
            user_repo,
        }
    }
}

#[async_trait]
impl FollowerService for FollowerServiceImpl {
    async fn follow(&self, follower_id: Uuid, followed_id: Uuid) -> Result<FollowResponse, AppError> {
        if follower_id == followed_id {
            return Err(AppError::BadRequest("You cannot follow yourself".into()));
        }

        let followed = self
            .user_repo
            .find_by_id(followed_id)
            .await?
            .filter(|user| VisibilityService::is_discoverable(follower_id, user))
            .ok_or_else(|| AppError::NotFound("User not found".into()))?;

        // A duplicate edge surfaces as Conflict from the unique index.
        let follow = self
            .follow_repo
            .create(&Follow::new(follower_id, followed_id))
            .await?;

        tracing::info!(user_id = %follower_id, followed_id = %followed_id, "User followed");

        Ok(FollowResponse {
            message: format!("You are now following {}", followed.username),
            follow: follow.into(),
        })
    }

    async fn unfollow(&self, follower_id: Uuid, followed_id: Uuid) -> Result<(), AppError> {
        if !self.follow_repo.delete(follower_id, followed_id).await? {
            return Err(AppError::NotFound("You are not following this user".into()));
        }

        tracing::info!(user_id = %follower_id, followed_id = %followed_id, "User unfollowed");
        Ok(())
    }

    async fn get_following(&self, user_id: Uuid) -> Result<Vec<FollowDto>, AppError> {
        let follows = self.follow_repo.find_following(user_id).await?;
        Ok(follows.into_iter().map(FollowDto::from).collect())
    }

    async fn get_followers(&self, user_id: Uuid) -> Result<Vec<FollowDto>, AppError> {
        let follows = self.follow_repo.find_followers(user_id).await?;
        Ok(follows.into_iter().map(FollowDto::from).collect())
    }
}
