//! Reaction Service
//!
//! Likes and retweets. One reaction per (author, post, action).

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use super::access::ContentAccess;
use crate::application::dto::ReactionDto;
use crate::domain::{PostRepository, Reaction, ReactionAction, ReactionRepository};
use crate::shared::error::AppError;

/// Reaction service trait
#[async_trait]
pub trait ReactionService: Send + Sync {
    async fn react(
        &self,
        author_id: Uuid,
        post_id: Uuid,
        action: ReactionAction,
    ) -> Result<ReactionDto, AppError>;

    async fn unreact(
        &self,
        author_id: Uuid,
        post_id: Uuid,
        action: ReactionAction,
    ) -> Result<(), AppError>;

    async fn get_by_post(&self, viewer: Uuid, post_id: Uuid) -> Result<Vec<ReactionDto>, AppError>;

    /// Reactions `author_id` made, optionally of one kind
    async fn get_by_author(
        &self,
        viewer: Uuid,
        author_id: Uuid,
        action: Option<ReactionAction>,
    ) -> Result<Vec<ReactionDto>, AppError>;
}

/// ReactionService implementation
pub struct ReactionServiceImpl {
    reaction_repo: Arc<dyn ReactionRepository>,
    post_repo: Arc<dyn PostRepository>,
    access: ContentAccess,
}

impl ReactionServiceImpl {
    pub fn new(
        reaction_repo: Arc<dyn ReactionRepository>,
        post_repo: Arc<dyn PostRepository>,
        access: ContentAccess,
    ) -> Self {
        Self {
            reaction_repo,
            post_repo,
            access,
        }
    }

    /// The post must exist and its author must be readable by `viewer`.
    async fn ensure_post_visible(&self, viewer: Uuid, post_id: Uuid) -> Result<(), AppError> {
        let post = self
            .post_repo
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Post not found".into()))?;

        self.access.visible_author(viewer, post.author_id).await?;
        Ok(())
    }
}

#[async_trait]
impl ReactionService for ReactionServiceImpl {
    async fn react(
        &self,
        author_id: Uuid,
        post_id: Uuid,
        action: ReactionAction,
    ) -> Result<ReactionDto, AppError> {
        self.ensure_post_visible(author_id, post_id).await?;

        let reaction = self
            .reaction_repo
            .create(&Reaction::new(author_id, post_id, action))
            .await?;

        tracing::info!(post_id = %post_id, user_id = %author_id, action = %action, "Reaction added");
        Ok(reaction.into())
    }

    async fn unreact(
        &self,
        author_id: Uuid,
        post_id: Uuid,
        action: ReactionAction,
    ) -> Result<(), AppError> {
        if !self.reaction_repo.delete(author_id, post_id, action).await? {
            return Err(AppError::NotFound("Reaction not found".into()));
        }

        tracing::info!(post_id = %post_id, user_id = %author_id, action = %action, "Reaction removed");
        Ok(())
    }

    async fn get_by_post(&self, viewer: Uuid, post_id: Uuid) -> Result<Vec<ReactionDto>, AppError> {
        self.ensure_post_visible(viewer, post_id).await?;

        let reactions = self.reaction_repo.find_by_post(post_id).await?;
        Ok(reactions.into_iter().map(ReactionDto::from).collect())
    }

    async fn get_by_author(
        &self,
        viewer: Uuid,
        author_id: Uuid,
        action: Option<ReactionAction>,
    ) -> Result<Vec<ReactionDto>, AppError> {
        self.access.visible_author(viewer, author_id).await?;

        let reactions = self
            .reaction_repo
            .find_by_author(viewer, author_id, action)
            .await?;
        Ok(reactions.into_iter().map(ReactionDto::from).collect())
    }
}
