//! # Domain Entities
//!
//! Core domain entities of the social network. All entities map directly to
//! their corresponding database tables.
//!
//! - **User**: account, credentials and visibility
//! - **Follow**: directed follower -> followed edge
//! - **Post**: a post, or a comment when it has a parent post
//! - **Reaction**: a like or retweet of a post
//! - **Message**: a direct message between two users
//!
//! Each entity has an associated repository trait defining data access
//! operations, implemented in the infrastructure layer.

mod follow;
mod message;
mod post;
mod reaction;
mod user;

pub use follow::{Follow, FollowRepository};
pub use message::{Message, MessageRepository};
pub use post::{Post, PostKind, PostRepository, PostWithAuthor};
pub use reaction::{Reaction, ReactionAction, ReactionRepository};
pub use user::{User, UserRepository, Visibility};

#[cfg(test)]
pub use follow::MockFollowRepository;
#[cfg(test)]
pub use message::MockMessageRepository;
#[cfg(test)]
pub use post::MockPostRepository;
#[cfg(test)]
pub use reaction::MockReactionRepository;
#[cfg(test)]
pub use user::MockUserRepository;
