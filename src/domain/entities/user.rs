//! User entity and repository trait.
//!
//! Maps to the `users` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::OffsetPagination;
use crate::shared::error::AppError;

/// Who may read a user's posts, comments and reactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Visibility {
    /// Everyone.
    #[default]
    Public,
    /// The user and their followers.
    Private,
    /// Only the user.
    Hidden,
}

impl Visibility {
    /// Convert from database string representation.
    ///
    /// Unknown values are treated as `Hidden` so a bad row never leaks content.
    pub fn from_db(s: &str) -> Self {
        match s {
            "PUBLIC" => Self::Public,
            "PRIVATE" => Self::Private,
            _ => Self::Hidden,
        }
    }

    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "PUBLIC",
            Self::Private => "PRIVATE",
            Self::Hidden => "HIDDEN",
        }
    }
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Represents a user account.
///
/// Maps to the `users` table:
/// - id: UUID PRIMARY KEY (v7)
/// - name: VARCHAR(64) NULL
/// - username: VARCHAR(32) NOT NULL UNIQUE
/// - email: VARCHAR(255) NOT NULL UNIQUE
/// - password_hash: TEXT NOT NULL
/// - visibility: TEXT NOT NULL DEFAULT 'PUBLIC'
/// - profile_picture: TEXT NULL (storage key)
/// - created_at / updated_at: TIMESTAMPTZ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,

    pub name: Option<String>,

    pub username: String,

    pub email: String,

    /// Argon2 PHC string
    #[serde(skip_serializing)]
    pub password_hash: String,

    pub visibility: Visibility,

    pub profile_picture: Option<String>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl User {
    /// New account with a fresh time-ordered id.
    pub fn new(username: String, email: String, password_hash: String, name: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name,
            username,
            email,
            password_hash,
            visibility: Visibility::default(),
            profile_picture: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Repository trait for User data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    /// Insert a user. Duplicate email or username yields `AppError::Conflict`.
    async fn create(&self, user: &User) -> Result<User, AppError>;

    /// Persist name, password hash, visibility and profile picture.
    async fn update(&self, user: &User) -> Result<User, AppError>;

    /// Delete a user and everything they own.
    ///
    /// Counters on other users' posts that this user's comments and reactions
    /// contributed to are reversed first, in the same transaction.
    async fn delete(&self, id: Uuid) -> Result<(), AppError>;

    /// Users whose username contains `fragment` (case-insensitive).
    /// Hidden users are left out unless they are the viewer.
    async fn search_by_username(
        &self,
        fragment: &str,
        viewer: Uuid,
        page: OffsetPagination,
    ) -> Result<Vec<User>, AppError>;

    /// Users `user_id` does not follow yet, excluding themselves and hidden users.
    async fn find_recommended(
        &self,
        user_id: Uuid,
        page: OffsetPagination,
    ) -> Result<Vec<User>, AppError>;
}
