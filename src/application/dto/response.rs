//! Response DTOs
//!
//! Data structures for API response bodies. All keys are camelCase.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    Follow, Message, Post, PostWithAuthor, Reaction, ReactionAction, User, Visibility,
};

/// Signup/login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Plain confirmation body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmationResponse {
    pub message: String,
}

impl ConfirmationResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Full user representation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: Uuid,
    pub name: Option<String>,
    pub username: String,
    /// Only present when a user looks at their own account
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub visibility: Visibility,
    pub profile_picture: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserDto {
    pub fn from_user(user: User, include_email: bool) -> Self {
        Self {
            id: user.id,
            name: user.name,
            username: user.username,
            email: include_email.then_some(user.email),
            visibility: user.visibility,
            profile_picture: user.profile_picture,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Compact user card shown next to posts and in searches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserViewDto {
    pub id: Uuid,
    pub name: Option<String>,
    pub username: String,
    pub profile_picture: Option<String>,
}

impl From<User> for UserViewDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            username: user.username,
            profile_picture: user.profile_picture,
        }
    }
}

/// Another user's profile as seen by the requester
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileDto {
    pub is_following: bool,
    pub user: UserDto,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDto {
    pub id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub images: Vec<String>,
    pub qty_likes: i32,
    pub qty_retweets: i32,
    pub qty_comments: i32,
    pub created_at: DateTime<Utc>,
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            author_id: post.author_id,
            content: post.content,
            images: post.images,
            qty_likes: post.qty_likes,
            qty_retweets: post.qty_retweets,
            qty_comments: post.qty_comments,
            created_at: post.created_at,
        }
    }
}

/// Post together with its author card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedPostDto {
    #[serde(flatten)]
    pub post: PostDto,
    pub author: UserViewDto,
}

impl From<PostWithAuthor> for ExtendedPostDto {
    fn from(value: PostWithAuthor) -> Self {
        Self {
            post: value.post.into(),
            author: value.author.into(),
        }
    }
}

/// A comment: a post plus the post it answers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDto {
    #[serde(flatten)]
    pub post: PostDto,
    pub parent_post_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<UserViewDto>,
}

impl CommentDto {
    /// `None` when `post` has no parent.
    pub fn from_post(post: Post, author: Option<User>) -> Option<Self> {
        let parent_post_id = post.parent_post_id?;
        Some(Self {
            post: post.into(),
            parent_post_id,
            author: author.map(UserViewDto::from),
        })
    }
}

/// A post and one page of its comments
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostCommentsDto {
    pub parent_post: ExtendedPostDto,
    pub comments: Vec<CommentDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionDto {
    pub id: Uuid,
    pub author_id: Uuid,
    pub post_id: Uuid,
    pub action: ReactionAction,
    pub created_at: DateTime<Utc>,
}

impl From<Reaction> for ReactionDto {
    fn from(reaction: Reaction) -> Self {
        Self {
            id: reaction.id,
            author_id: reaction.author_id,
            post_id: reaction.post_id,
            action: reaction.action,
            created_at: reaction.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowDto {
    pub id: Uuid,
    pub follower_id: Uuid,
    pub followed_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<Follow> for FollowDto {
    fn from(follow: Follow) -> Self {
        Self {
            id: follow.id,
            follower_id: follow.follower_id,
            followed_id: follow.followed_id,
            created_at: follow.created_at,
        }
    }
}

/// Body of a successful follow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowResponse {
    pub message: String,
    pub follow: FollowDto,
}

/// Direct message, also the payload of the gateway `message` event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDto {
    pub id: Uuid,
    pub content: String,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<Message> for MessageDto {
    fn from(message: Message) -> Self {
        Self {
            id: message.id,
            content: message.content,
            sender_id: message.sender_id,
            receiver_id: message.receiver_id,
            created_at: message.created_at,
        }
    }
}
