//! Post Service
//!
//! Feed, single post lookups, authoring and deletion of top-level posts.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use super::access::ContentAccess;
use crate::application::dto::{CreatePostRequest, ExtendedPostDto, PostDto};
use crate::domain::{CursorPagination, Post, PostKind, PostRepository, PostWithAuthor};
use crate::shared::error::AppError;

/// Post service trait
#[async_trait]
pub trait PostService: Send + Sync {
    /// Latest top-level posts `viewer` may read
    async fn get_feed(
        &self,
        viewer: Uuid,
        page: CursorPagination,
    ) -> Result<Vec<ExtendedPostDto>, AppError>;

    async fn get_post(&self, viewer: Uuid, post_id: Uuid) -> Result<ExtendedPostDto, AppError>;

    /// Top-level posts written by `author_id`
    async fn get_by_author(
        &self,
        viewer: Uuid,
        author_id: Uuid,
        page: CursorPagination,
    ) -> Result<Vec<ExtendedPostDto>, AppError>;

    async fn create(&self, author_id: Uuid, request: CreatePostRequest) -> Result<PostDto, AppError>;

    /// Only the author may delete a post
    async fn delete(&self, user_id: Uuid, post_id: Uuid) -> Result<(), AppError>;
}

/// PostService implementation
pub struct PostServiceImpl {
    post_repo: Arc<dyn PostRepository>,
    access: ContentAccess,
}

impl PostServiceImpl {
    pub fn new(post_repo: Arc<dyn PostRepository>, access: ContentAccess) -> Self {
        Self { post_repo, access }
    }

    async fn find_post(&self, post_id: Uuid) -> Result<Post, AppError> {
        self.post_repo
            .find_by_id(post_id)
            .await?
            .filter(|post| !post.is_comment())
            .ok_or_else(|| AppError::NotFound("Post not found".into()))
    }
}

#[async_trait]
impl PostService for PostServiceImpl {
    async fn get_feed(
        &self,
        viewer: Uuid,
        page: CursorPagination,
    ) -> Result<Vec<ExtendedPostDto>, AppError> {
        let posts = self.post_repo.find_feed(viewer, page).await?;
        Ok(posts.into_iter().map(ExtendedPostDto::from).collect())
    }

    async fn get_post(&self, viewer: Uuid, post_id: Uuid) -> Result<ExtendedPostDto, AppError> {
        let post = self.find_post(post_id).await?;
        let author = self.access.visible_author(viewer, post.author_id).await?;

        Ok(PostWithAuthor { post, author }.into())
    }

    async fn get_by_author(
        &self,
        viewer: Uuid,
        author_id: Uuid,
        page: CursorPagination,
    ) -> Result<Vec<ExtendedPostDto>, AppError> {
        let author = self.access.visible_author(viewer, author_id).await?;
        let posts = self
            .post_repo
            .find_by_author(author_id, PostKind::Post, page)
            .await?;

        Ok(posts
            .into_iter()
            .map(|post| {
                PostWithAuthor {
                    post,
                    author: author.clone(),
                }
                .into()
            })
            .collect())
    }

    async fn create(&self, author_id: Uuid, request: CreatePostRequest) -> Result<PostDto, AppError> {
        let post = self
            .post_repo
            .create(&Post::new(author_id, request.content, request.images))
            .await?;

        tracing::info!(post_id = %post.id, author_id = %author_id, "Post created");
        Ok(post.into())
    }

    async fn delete(&self, user_id: Uuid, post_id: Uuid) -> Result<(), AppError> {
        let post = self.find_post(post_id).await?;
        if post.author_id != user_id {
            return Err(AppError::Forbidden("Only the author can delete this post".into()));
        }

        self.post_repo.delete(post_id).await?;
        tracing::info!(post_id = %post_id, author_id = %user_id, "Post deleted");
        Ok(())
    }
}
