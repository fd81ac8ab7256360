//! Follower Handlers

use axum::{
    extract::{Extension, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::application::dto::{ConfirmationResponse, FollowDto, FollowResponse};
use crate::presentation::http::extractors::{AppJson, AppPath};
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::startup::AppState;

pub async fn follow(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    AppPath(user_id): AppPath<Uuid>,
) -> Result<(StatusCode, AppJson<FollowResponse>), AppError> {
    let response = state.followers.follow(auth.user_id, user_id).await?;
    Ok((StatusCode::CREATED, AppJson(response)))
}

pub async fn unfollow(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    AppPath(user_id): AppPath<Uuid>,
) -> Result<AppJson<ConfirmationResponse>, AppError> {
    state.followers.unfollow(auth.user_id, user_id).await?;
    Ok(AppJson(ConfirmationResponse::new("Unfollowed")))
}

/// Users the caller follows
pub async fn get_following(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<AppJson<Vec<FollowDto>>, AppError> {
    let follows = state.followers.get_following(auth.user_id).await?;
    Ok(AppJson(follows))
}

/// Users following the caller
pub async fn get_followers(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<AppJson<Vec<FollowDto>>, AppError> {
    let follows = state.followers.get_followers(auth.user_id).await?;
    Ok(AppJson(follows))
}
