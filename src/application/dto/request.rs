//! Request DTOs
//!
//! Data structures for API request bodies and query strings.

use serde::Deserialize;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::domain::{ReactionAction, Visibility};
use crate::shared::validation::{not_blank, strong_password};

/// Signup request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[validate(length(min = 1, max = 64, message = "Name must be 1-64 characters"))]
    pub name: Option<String>,

    #[validate(length(min = 2, max = 32, message = "Username must be 2-32 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(custom(function = "strong_password"))]
    pub password: String,
}

/// Login request. Either `email` or `username` identifies the account.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "login_identifier"))]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    pub username: Option<String>,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

fn login_identifier(request: &LoginRequest) -> Result<(), ValidationError> {
    if request.email.is_none() && request.username.is_none() {
        return Err(ValidationError::new("identifier")
            .with_message("Either email or username is required".into()));
    }
    Ok(())
}

/// Update the authenticated user
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 64, message = "Name must be 1-64 characters"))]
    pub name: Option<String>,

    #[validate(custom(function = "strong_password"))]
    pub password: Option<String>,

    pub visibility: Option<Visibility>,

    /// Storage key of an already uploaded picture
    #[validate(length(min = 1, max = 512, message = "Profile picture key must be 1-512 characters"))]
    pub profile_picture: Option<String>,
}

/// Create a post or a comment
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    #[validate(
        length(min = 1, max = 240, message = "Content must be 1-240 characters"),
        custom(function = "not_blank")
    )]
    pub content: String,

    #[serde(default)]
    #[validate(length(max = 4, message = "At most 4 images per post"))]
    pub images: Vec<String>,
}

/// Add or remove a reaction
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionRequest {
    pub action: ReactionAction,
}

/// Direct message body for the REST endpoint
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    #[validate(
        length(min = 1, max = 1000, message = "Content must be 1-1000 characters"),
        custom(function = "not_blank")
    )]
    pub content: String,
}

/// Direct message sent over the gateway
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DirectMessageRequest {
    pub receiver_id: Uuid,

    #[validate(
        length(min = 1, max = 1000, message = "Content must be 1-1000 characters"),
        custom(function = "not_blank")
    )]
    pub content: String,
}

/// Keyset page query (`?limit=&before=&after=`)
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorQuery {
    pub limit: Option<u32>,
    pub before: Option<Uuid>,
    pub after: Option<Uuid>,
}

/// Offset page query (`?limit=&skip=`)
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OffsetQuery {
    pub limit: Option<u32>,
    pub skip: Option<u32>,
}

/// `?authorId=` filter for reaction listings
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorQuery {
    pub author_id: Uuid,
}
