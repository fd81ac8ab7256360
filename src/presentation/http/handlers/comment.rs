//! Comment Handlers

use axum::{
    extract::{Extension, State},
    http::StatusCode,
};
use uuid::Uuid;

use super::cursor_page;
use crate::application::dto::{
    CommentDto, ConfirmationResponse, CreatePostRequest, CursorQuery, PostCommentsDto,
};
use crate::presentation::http::extractors::{AppJson, AppPath, AppQuery};
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::shared::validation::validate;
use crate::startup::AppState;

/// A post with one page of its comments
pub async fn get_comments(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    AppPath(post_id): AppPath<Uuid>,
    AppQuery(query): AppQuery<CursorQuery>,
) -> Result<AppJson<PostCommentsDto>, AppError> {
    let page = cursor_page(&state.settings.pagination, query);
    let comments = state.comments.get_comments(auth.user_id, post_id, page).await?;
    Ok(AppJson(comments))
}

pub async fn get_comment(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    AppPath(comment_id): AppPath<Uuid>,
) -> Result<AppJson<CommentDto>, AppError> {
    let comment = state.comments.get_comment(auth.user_id, comment_id).await?;
    Ok(AppJson(comment))
}

pub async fn get_by_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    AppPath(user_id): AppPath<Uuid>,
    AppQuery(query): AppQuery<CursorQuery>,
) -> Result<AppJson<Vec<CommentDto>>, AppError> {
    let page = cursor_page(&state.settings.pagination, query);
    let comments = state
        .comments
        .get_by_author(auth.user_id, user_id, page)
        .await?;
    Ok(AppJson(comments))
}

pub async fn create_comment(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    AppPath(post_id): AppPath<Uuid>,
    AppJson(body): AppJson<CreatePostRequest>,
) -> Result<(StatusCode, AppJson<CommentDto>), AppError> {
    validate(&body)?;

    let comment = state.comments.create(auth.user_id, post_id, body).await?;
    Ok((StatusCode::CREATED, AppJson(comment)))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    AppPath(comment_id): AppPath<Uuid>,
) -> Result<AppJson<ConfirmationResponse>, AppError> {
    state.comments.delete(auth.user_id, comment_id).await?;
    Ok(AppJson(ConfirmationResponse::new("Comment deleted")))
}
