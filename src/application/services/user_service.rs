//! User Service
//!
//! Profiles, search, recommendations and account management.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::auth_service::hash_password;
use crate::application::dto::{UpdateUserRequest, UserDto, UserProfileDto, UserViewDto};
use crate::domain::services::VisibilityService;
use crate::domain::{FollowRepository, OffsetPagination, UserRepository};
use crate::shared::error::AppError;

/// User service trait
#[async_trait]
pub trait UserService: Send + Sync {
    /// The authenticated user's own account
    async fn get_me(&self, user_id: Uuid) -> Result<UserDto, AppError>;

    /// Another user's profile and whether `viewer` follows them
    async fn get_profile(&self, viewer: Uuid, user_id: Uuid) -> Result<UserProfileDto, AppError>;

    /// Users whose username contains `fragment`
    async fn search_by_username(
        &self,
        viewer: Uuid,
        fragment: &str,
        page: OffsetPagination,
    ) -> Result<Vec<UserViewDto>, AppError>;

    /// Users `user_id` might want to follow
    async fn get_recommendations(
        &self,
        user_id: Uuid,
        page: OffsetPagination,
    ) -> Result<Vec<UserViewDto>, AppError>;

    async fn update(&self, user_id: Uuid, request: UpdateUserRequest) -> Result<UserDto, AppError>;

    async fn delete(&self, user_id: Uuid) -> Result<(), AppError>;
}

/// UserService implementation
pub struct UserServiceImpl {
    user_repo: Arc<dyn UserRepository>,
    follow_repo: Arc<dyn FollowRepository>,
}

impl UserServiceImpl {
    pub fn new(user_repo: Arc<dyn UserRepository>, follow_repo: Arc<dyn FollowRepository>) -> Self {
        Self {
            user_repo,
            follow_repo,
        }
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    async fn get_me(&self, user_id: Uuid) -> Result<UserDto, AppError> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))?;

        Ok(UserDto::from_user(user, true))
    }

    async fn get_profile(&self, viewer: Uuid, user_id: Uuid) -> Result<UserProfileDto, AppError> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .filter(|user| VisibilityService::is_discoverable(viewer, user))
            .ok_or_else(|| AppError::NotFound("User not found".into()))?;

        let is_following = viewer != user_id && self.follow_repo.exists(viewer, user_id).await?;
        let is_self = viewer == user_id;

        Ok(UserProfileDto {
            is_following,
            user: UserDto::from_user(user, is_self),
        })
    }

    async fn search_by_username(
        &self,
        viewer: Uuid,
        fragment: &str,
        page: OffsetPagination,
    ) -> Result<Vec<UserViewDto>, AppError> {
        let fragment = fragment.trim();
        if fragment.is_empty() {
            return Err(AppError::BadRequest("Username fragment must not be empty".into()));
        }

        let users = self
            .user_repo
            .search_by_username(fragment, viewer, page)
            .await?;

        Ok(users.into_iter().map(UserViewDto::from).collect())
    }

    async fn get_recommendations(
        &self,
        user_id: Uuid,
        page: OffsetPagination,
    ) -> Result<Vec<UserViewDto>, AppError> {
        let users = self.user_repo.find_recommended(user_id, page).await?;
        Ok(users.into_iter().map(UserViewDto::from).collect())
    }

    async fn update(&self, user_id: Uuid, request: UpdateUserRequest) -> Result<UserDto, AppError> {
        let mut user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))?;

        if let Some(name) = request.name {
            user.name = Some(name);
        }
        if let Some(password) = request.password {
            user.password_hash = hash_password(&password)?;
        }
        if let Some(visibility) = request.visibility {
            user.visibility = visibility;
        }
        if let Some(profile_picture) = request.profile_picture {
            user.profile_picture = Some(profile_picture);
        }
        user.updated_at = Utc::now();

        let user = self.user_repo.update(&user).await?;
        tracing::info!(user_id = %user_id, visibility = %user.visibility, "User updated");

        Ok(UserDto::from_user(user, true))
    }

    async fn delete(&self, user_id: Uuid) -> Result<(), AppError> {
        self.user_repo.delete(user_id).await?;
        tracing::info!(user_id = %user_id, "User deleted");
        Ok(())
    }
}
