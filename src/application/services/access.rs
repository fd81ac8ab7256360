//! Read access checks shared by the post, comment and reaction services.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::services::VisibilityService;
use crate::domain::{FollowRepository, User, UserRepository};
use crate::shared::error::AppError;

/// Resolves authors and applies [`VisibilityService`] with a follow lookup
/// only when one is needed.
#[derive(Clone)]
pub struct ContentAccess {
    users: Arc<dyn UserRepository>,
    follows: Arc<dyn FollowRepository>,
}

impl ContentAccess {
    pub fn new(users: Arc<dyn UserRepository>, follows: Arc<dyn FollowRepository>) -> Self {
        Self { users, follows }
    }

    /// Whether `viewer` may read `author`'s content.
    pub async fn can_view(&self, viewer: Uuid, author: &User) -> Result<bool, AppError> {
        let follows = if VisibilityService::needs_follow_check(viewer, author) {
            self.follows.exists(viewer, author.id).await?
        } else {
            false
        };
        Ok(VisibilityService::can_view(viewer, author, follows))
    }

    /// Load `author_id` and make sure `viewer` may read their content.
    ///
    /// Missing authors are `NotFound`, unreadable ones `Forbidden`.
    pub async fn visible_author(&self, viewer: Uuid, author_id: Uuid) -> Result<User, AppError> {
        let author = self
            .users
            .find_by_id(author_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))?;

        if !self.can_view(viewer, &author).await? {
            tracing::debug!(viewer = %viewer, author_id = %author_id, "Content access denied");
            return Err(AppError::Forbidden(
                "You are not allowed to see this user's content".into(),
            ));
        }
        Ok(author)
    }
}
