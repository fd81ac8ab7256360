//! Repository Implementations
//!
//! PostgreSQL implementations of the domain repository traits, one per
//! entity, plus the [`Repositories`] bundle the application state is built
//! from.
//!
//! ## Available Repositories
//!
//! - **PgUserRepository** - Accounts, search, recommendations
//! - **PgFollowRepository** - Follow edges
//! - **PgPostRepository** - Posts and comments with comment counters
//! - **PgReactionRepository** - Likes/retweets with reaction counters
//! - **PgMessageRepository** - Direct messages with cursor pagination

mod keyset;

pub mod follow_repository;
pub mod message_repository;
pub mod post_repository;
pub mod reaction_repository;
pub mod user_repository;

use std::sync::Arc;

use sqlx::PgPool;

use crate::domain::{
    FollowRepository, MessageRepository, PostRepository, ReactionRepository, UserRepository,
};

pub use follow_repository::PgFollowRepository;
pub use message_repository::PgMessageRepository;
pub use post_repository::PgPostRepository;
pub use reaction_repository::PgReactionRepository;
pub use user_repository::PgUserRepository;

/// One implementation of every repository trait.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub follows: Arc<dyn FollowRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub reactions: Arc<dyn ReactionRepository>,
    pub messages: Arc<dyn MessageRepository>,
}

impl Repositories {
    /// PostgreSQL repositories sharing one pool.
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            follows: Arc::new(PgFollowRepository::new(pool.clone())),
            posts: Arc::new(PgPostRepository::new(pool.clone())),
            reactions: Arc::new(PgReactionRepository::new(pool.clone())),
            messages: Arc::new(PgMessageRepository::new(pool)),
        }
    }
}
