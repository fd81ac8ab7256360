//! Message Service
//!
//! Direct messages between two users. Both the REST endpoint and the gateway
//! persist through [`MessageService::send`]; fan-out happens in the
//! presentation layer once the message is stored.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::application::dto::MessageDto;
use crate::domain::services::MessagingPolicy;
use crate::domain::{CursorPagination, FollowRepository, Message, MessageRepository, UserRepository};
use crate::shared::error::AppError;

/// Message service trait
#[async_trait]
pub trait MessageService: Send + Sync {
    /// Check the messaging policy and persist a message from `sender_id`.
    ///
    /// Nothing is stored when the policy refuses the pair.
    async fn send(
        &self,
        sender_id: Uuid,
        receiver_id: Uuid,
        content: String,
    ) -> Result<MessageDto, AppError>;

    /// Messages between `user_id` and `other_id`, newest first
    async fn get_conversation(
        &self,
        user_id: Uuid,
        other_id: Uuid,
        page: CursorPagination,
    ) -> Result<Vec<MessageDto>, AppError>;

    async fn get_message(&self, user_id: Uuid, message_id: Uuid) -> Result<MessageDto, AppError>;

    async fn delete(&self, user_id: Uuid, message_id: Uuid) -> Result<(), AppError>;
}

/// MessageService implementation
pub struct MessageServiceImpl {
    message_repo: Arc<dyn MessageRepository>,
    user_repo: Arc<dyn UserRepository>,
    follow_repo: Arc<dyn FollowRepository>,
    policy: MessagingPolicy,
}

impl MessageServiceImpl {
    pub fn new(
        message_repo: Arc<dyn MessageRepository>,
        user_repo: Arc<dyn UserRepository>,
        follow_repo: Arc<dyn FollowRepository>,
        policy: MessagingPolicy,
    ) -> Self {
        Self {
            message_repo,
            user_repo,
            follow_repo,
            policy,
        }
    }

    /// Looks up only the follow edges the configured policy cares about.
    async fn is_permitted(&self, sender_id: Uuid, receiver_id: Uuid) -> Result<bool, AppError> {
        let required = self.policy.required_edges();

        let sender_follows = if required.sender_to_receiver {
            self.follow_repo.exists(sender_id, receiver_id).await?
        } else {
            false
        };
        let receiver_follows = if required.receiver_to_sender {
            self.follow_repo.exists(receiver_id, sender_id).await?
        } else {
            false
        };

        Ok(self.policy.permits(sender_follows, receiver_follows))
    }

    async fn find_message(&self, message_id: Uuid) -> Result<Message, AppError> {
        self.message_repo
            .find_by_id(message_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Message not found".into()))
    }
}

#[async_trait]
impl MessageService for MessageServiceImpl {
    async fn send(
        &self,
        sender_id: Uuid,
        receiver_id: Uuid,
        content: String,
    ) -> Result<MessageDto, AppError> {
        if sender_id == receiver_id {
            return Err(AppError::BadRequest("You cannot message yourself".into()));
        }

        if self.user_repo.find_by_id(receiver_id).await?.is_none() {
            return Err(AppError::NotFound("Receiver not found".into()));
        }

        if !self.is_permitted(sender_id, receiver_id).await? {
            tracing::debug!(
                sender_id = %sender_id,
                receiver_id = %receiver_id,
                policy = ?self.policy,
                "Message refused by policy"
            );
            return Err(AppError::Forbidden(
                "You are not allowed to message this user".into(),
            ));
        }

        let message = self
            .message_repo
            .create(&Message::new(sender_id, receiver_id, content))
            .await?;

        tracing::info!(message_id = %message.id, sender_id = %sender_id, receiver_id = %receiver_id, "Message stored");
        Ok(message.into())
    }

    async fn get_conversation(
        &self,
        user_id: Uuid,
        other_id: Uuid,
        page: CursorPagination,
    ) -> Result<Vec<MessageDto>, AppError> {
        let messages = self
            .message_repo
            .find_conversation(user_id, other_id, page)
            .await?;
        Ok(messages.into_iter().map(MessageDto::from).collect())
    }

    async fn get_message(&self, user_id: Uuid, message_id: Uuid) -> Result<MessageDto, AppError> {
        let message = self.find_message(message_id).await?;
        if !message.involves(user_id) {
            return Err(AppError::Forbidden(
                "You are not part of this conversation".into(),
            ));
        }
        Ok(message.into())
    }

    async fn delete(&self, user_id: Uuid, message_id: Uuid) -> Result<(), AppError> {
        let message = self.find_message(message_id).await?;
        if message.sender_id != user_id {
            return Err(AppError::Forbidden(
                "Only the sender can delete this message".into(),
            ));
        }

        self.message_repo.delete(message_id).await?;
        tracing::info!(message_id = %message_id, user_id = %user_id, "Message deleted");
        Ok(())
    }
}
