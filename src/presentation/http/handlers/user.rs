//! User Handlers

use axum::{
    extract::{Extension, State},
    http::StatusCode,
};
use uuid::Uuid;

use super::offset_page;
use crate::application::dto::{
    OffsetQuery, UpdateUserRequest, UserDto, UserProfileDto, UserViewDto,
};
use crate::presentation::http::extractors::{AppJson, AppPath, AppQuery};
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::shared::validation::validate;
use crate::startup::AppState;

/// Users the caller does not follow yet
pub async fn get_recommendations(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    AppQuery(query): AppQuery<OffsetQuery>,
) -> Result<AppJson<Vec<UserViewDto>>, AppError> {
    let page = offset_page(&state.settings.pagination, query);
    let users = state.users.get_recommendations(auth.user_id, page).await?;
    Ok(AppJson(users))
}

/// Get current authenticated user
pub async fn get_current_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<AppJson<UserDto>, AppError> {
    let user = state.users.get_me(auth.user_id).await?;
    Ok(AppJson(user))
}

/// Get another user's profile
pub async fn get_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    AppPath(user_id): AppPath<Uuid>,
) -> Result<AppJson<UserProfileDto>, AppError> {
    let profile = state.users.get_profile(auth.user_id, user_id).await?;
    Ok(AppJson(profile))
}

pub async fn search_by_username(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    AppPath(username): AppPath<String>,
    AppQuery(query): AppQuery<OffsetQuery>,
) -> Result<AppJson<Vec<UserViewDto>>, AppError> {
    let page = offset_page(&state.settings.pagination, query);
    let users = state
        .users
        .search_by_username(auth.user_id, &username, page)
        .await?;
    Ok(AppJson(users))
}

/// Update current user profile
pub async fn update_current_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    AppJson(body): AppJson<UpdateUserRequest>,
) -> Result<AppJson<UserDto>, AppError> {
    validate(&body)?;

    let user = state.users.update(auth.user_id, body).await?;
    Ok(AppJson(user))
}

/// Delete the current account with everything it owns
pub async fn delete_current_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<StatusCode, AppError> {
    state.users.delete(auth.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
