//! Post Handlers

use axum::{
    extract::{Extension, State},
    http::StatusCode,
};
use uuid::Uuid;

use super::cursor_page;
use crate::application::dto::{
    ConfirmationResponse, CreatePostRequest, CursorQuery, ExtendedPostDto, PostDto,
};
use crate::presentation::http::extractors::{AppJson, AppPath, AppQuery};
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::shared::validation::validate;
use crate::startup::AppState;

/// Newest readable top-level posts
pub async fn get_feed(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    AppQuery(query): AppQuery<CursorQuery>,
) -> Result<AppJson<Vec<ExtendedPostDto>>, AppError> {
    let page = cursor_page(&state.settings.pagination, query);
    let posts = state.posts.get_feed(auth.user_id, page).await?;
    Ok(AppJson(posts))
}

pub async fn get_post(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    AppPath(post_id): AppPath<Uuid>,
) -> Result<AppJson<ExtendedPostDto>, AppError> {
    let post = state.posts.get_post(auth.user_id, post_id).await?;
    Ok(AppJson(post))
}

pub async fn get_by_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    AppPath(user_id): AppPath<Uuid>,
    AppQuery(query): AppQuery<CursorQuery>,
) -> Result<AppJson<Vec<ExtendedPostDto>>, AppError> {
    let page = cursor_page(&state.settings.pagination, query);
    let posts = state.posts.get_by_author(auth.user_id, user_id, page).await?;
    Ok(AppJson(posts))
}

pub async fn create_post(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    AppJson(body): AppJson<CreatePostRequest>,
) -> Result<(StatusCode, AppJson<PostDto>), AppError> {
    validate(&body)?;

    let post = state.posts.create(auth.user_id, body).await?;
    Ok((StatusCode::CREATED, AppJson(post)))
}

pub async fn delete_post(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    AppPath(post_id): AppPath<Uuid>,
) -> Result<AppJson<ConfirmationResponse>, AppError> {
    state.posts.delete(auth.user_id, post_id).await?;
    Ok(AppJson(ConfirmationResponse::new("Post deleted")))
}
