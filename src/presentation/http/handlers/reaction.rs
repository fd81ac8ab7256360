//! Reaction Handlers

use axum::{
    extract::{Extension, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::application::dto::{AuthorQuery, ConfirmationResponse, ReactionDto, ReactionRequest};
use crate::domain::ReactionAction;
use crate::presentation::http::extractors::{AppJson, AppPath, AppQuery};
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::startup::AppState;

pub async fn react(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    AppPath(post_id): AppPath<Uuid>,
    AppJson(body): AppJson<ReactionRequest>,
) -> Result<(StatusCode, AppJson<ReactionDto>), AppError> {
    let reaction = state
        .reactions
        .react(auth.user_id, post_id, body.action)
        .await?;
    Ok((StatusCode::CREATED, AppJson(reaction)))
}

pub async fn unreact(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    AppPath(post_id): AppPath<Uuid>,
    AppJson(body): AppJson<ReactionRequest>,
) -> Result<AppJson<ConfirmationResponse>, AppError> {
    state
        .reactions
        .unreact(auth.user_id, post_id, body.action)
        .await?;
    Ok(AppJson(ConfirmationResponse::new("Reaction removed")))
}

pub async fn get_by_post(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    AppPath(post_id): AppPath<Uuid>,
) -> Result<AppJson<Vec<ReactionDto>>, AppError> {
    let reactions = state.reactions.get_by_post(auth.user_id, post_id).await?;
    Ok(AppJson(reactions))
}

/// Likes made by `?authorId=`
pub async fn get_likes(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    AppQuery(query): AppQuery<AuthorQuery>,
) -> Result<AppJson<Vec<ReactionDto>>, AppError> {
    by_author(&state, auth, query, ReactionAction::Like).await
}

/// Retweets made by `?authorId=`
pub async fn get_retweets(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    AppQuery(query): AppQuery<AuthorQuery>,
) -> Result<AppJson<Vec<ReactionDto>>, AppError> {
    by_author(&state, auth, query, ReactionAction::Retweet).await
}

async fn by_author(
    state: &AppState,
    auth: AuthUser,
    query: AuthorQuery,
    action: ReactionAction,
) -> Result<AppJson<Vec<ReactionDto>>, AppError> {
    let reactions = state
        .reactions
        .get_by_author(auth.user_id, query.author_id, Some(action))
        .await?;
    Ok(AppJson(reactions))
}
