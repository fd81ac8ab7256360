//! Authentication Handlers

use axum::{extract::State, http::StatusCode};

use crate::application::dto::{LoginRequest, SignupRequest, TokenResponse};
use crate::presentation::http::extractors::AppJson;
use crate::shared::error::AppError;
use crate::shared::validation::validate;
use crate::startup::AppState;

/// Register a new user
pub async fn signup(
    State(state): State<AppState>,
    AppJson(body): AppJson<SignupRequest>,
) -> Result<(StatusCode, AppJson<TokenResponse>), AppError> {
    validate(&body)?;

    let token = state.auth.signup(body).await?;

    Ok((StatusCode::CREATED, AppJson(token)))
}

/// Login with email or username
pub async fn login(
    State(state): State<AppState>,
    AppJson(body): AppJson<LoginRequest>,
) -> Result<AppJson<TokenResponse>, AppError> {
    validate(&body)?;

    let token = state.auth.login(body).await?;

    Ok(AppJson(token))
}
