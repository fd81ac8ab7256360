//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **AuthService**: Signup, login, JWT tokens, password hashing
//! - **UserService**: Profiles, search, recommendations, account updates
//! - **PostService**: Feed and top-level posts
//! - **CommentService**: Comments on posts
//! - **ReactionService**: Likes and retweets
//! - **FollowerService**: Follow edges
//! - **MessageService**: Direct messages and the messaging policy

mod access;
pub mod auth_service;
pub mod comment_service;
pub mod follower_service;
pub mod message_service;
pub mod post_service;
pub mod reaction_service;
pub mod user_service;

pub use access::ContentAccess;

// Re-export auth service types
pub use auth_service::{
    hash_password, verify_password, AuthError, AuthService, AuthServiceImpl, Claims, TokenService,
};

pub use comment_service::{CommentService, CommentServiceImpl};
pub use follower_service::{FollowerService, FollowerServiceImpl};
pub use message_service::{MessageService, MessageServiceImpl};
pub use post_service::{PostService, PostServiceImpl};
pub use reaction_service::{ReactionService, ReactionServiceImpl};
pub use user_service::{UserService, UserServiceImpl};
