//! Message Handlers
//!
//! The REST send path applies the same policy as the gateway and fans the
//! stored message out to every connected session of both participants.

use axum::{
    extract::{Extension, State},
    http::StatusCode,
};
use uuid::Uuid;

use super::cursor_page;
use crate::application::dto::{ConfirmationResponse, CursorQuery, MessageDto, SendMessageRequest};
use crate::infrastructure::metrics;
use crate::presentation::http::extractors::{AppJson, AppPath, AppQuery};
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::shared::validation::validate;
use crate::startup::AppState;

/// Conversation between the caller and another user, newest first
pub async fn get_conversation(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    AppPath(user_id): AppPath<Uuid>,
    AppQuery(query): AppQuery<CursorQuery>,
) -> Result<AppJson<Vec<MessageDto>>, AppError> {
    let page = cursor_page(&state.settings.pagination, query);
    let messages = state
        .messages
        .get_conversation(auth.user_id, user_id, page)
        .await?;
    Ok(AppJson(messages))
}

/// Send a message to the user in the path
pub async fn send_message(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    AppPath(receiver_id): AppPath<Uuid>,
    AppJson(body): AppJson<SendMessageRequest>,
) -> Result<(StatusCode, AppJson<MessageDto>), AppError> {
    validate(&body)?;

    let message = state
        .messages
        .send(auth.user_id, receiver_id, body.content)
        .await?;

    state.gateway.deliver_message(message.clone());
    metrics::record_message_delivered("http");

    Ok((StatusCode::CREATED, AppJson(message)))
}

pub async fn get_message(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    AppPath(message_id): AppPath<Uuid>,
) -> Result<AppJson<MessageDto>, AppError> {
    let message = state.messages.get_message(auth.user_id, message_id).await?;
    Ok(AppJson(message))
}

pub async fn delete_message(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    AppPath(message_id): AppPath<Uuid>,
) -> Result<AppJson<ConfirmationResponse>, AppError> {
    state.messages.delete(auth.user_id, message_id).await?;
    Ok(AppJson(ConfirmationResponse::new("Message deleted")))
}
