//! Comment Service
//!
//! A comment is a post with a parent. Reading or answering a post requires
//! read access to the parent's author.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use super::access::ContentAccess;
use crate::application::dto::{CommentDto, CreatePostRequest, PostCommentsDto};
use crate::domain::{CursorPagination, Post, PostKind, PostRepository, PostWithAuthor, User};
use crate::shared::error::AppError;

/// Comment service trait
#[async_trait]
pub trait CommentService: Send + Sync {
    /// A post and one page of the comments `viewer` may read
    async fn get_comments(
        &self,
        viewer: Uuid,
        post_id: Uuid,
        page: CursorPagination,
    ) -> Result<PostCommentsDto, AppError>;

    async fn get_comment(&self, viewer: Uuid, comment_id: Uuid) -> Result<CommentDto, AppError>;

    async fn get_by_author(
        &self,
        viewer: Uuid,
        author_id: Uuid,
        page: CursorPagination,
    ) -> Result<Vec<CommentDto>, AppError>;

    async fn create(
        &self,
        author_id: Uuid,
        post_id: Uuid,
        request: CreatePostRequest,
    ) -> Result<CommentDto, AppError>;

    async fn delete(&self, user_id: Uuid, comment_id: Uuid) -> Result<(), AppError>;
}

/// CommentService implementation
pub struct CommentServiceImpl {
    post_repo: Arc<dyn PostRepository>,
    access: ContentAccess,
}

impl CommentServiceImpl {
    pub fn new(post_repo: Arc<dyn PostRepository>, access: ContentAccess) -> Self {
        Self { post_repo, access }
    }

    async fn find_parent(&self, post_id: Uuid) -> Result<Post, AppError> {
        self.post_repo
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Post not found".into()))
    }

    async fn find_comment(&self, comment_id: Uuid) -> Result<Post, AppError> {
        self.post_repo
            .find_by_id(comment_id)
            .await?
            .filter(Post::is_comment)
            .ok_or_else(|| AppError::NotFound("Comment not found".into()))
    }
}

fn to_comment(post: Post, author: User) -> Result<CommentDto, AppError> {
    CommentDto::from_post(post, Some(author))
        .ok_or_else(|| AppError::Internal("Comment without parent".into()))
}

#[async_trait]
impl CommentService for CommentServiceImpl {
    async fn get_comments(
        &self,
        viewer: Uuid,
        post_id: Uuid,
        page: CursorPagination,
    ) -> Result<PostCommentsDto, AppError> {
        let parent = self.find_parent(post_id).await?;
        let author = self.access.visible_author(viewer, parent.author_id).await?;

        let comments = self
            .post_repo
            .find_comments(post_id, viewer, page)
            .await?
            .into_iter()
            .filter_map(|PostWithAuthor { post, author }| CommentDto::from_post(post, Some(author)))
            .collect();

        Ok(PostCommentsDto {
            parent_post: PostWithAuthor {
                post: parent,
                author,
            }
            .into(),
            comments,
        })
    }

    async fn get_comment(&self, viewer: Uuid, comment_id: Uuid) -> Result<CommentDto, AppError> {
        let comment = self.find_comment(comment_id).await?;
        let author = self.access.visible_author(viewer, comment.author_id).await?;
        to_comment(comment, author)
    }

    async fn get_by_author(
        &self,
        viewer: Uuid,
        author_id: Uuid,
        page: CursorPagination,
    ) -> Result<Vec<CommentDto>, AppError> {
        let author = self.access.visible_author(viewer, author_id).await?;
        let comments = self
            .post_repo
            .find_by_author(author_id, PostKind::Comment, page)
            .await?;

        Ok(comments
            .into_iter()
            .filter_map(|post| CommentDto::from_post(post, Some(author.clone())))
            .collect())
    }

    async fn create(
        &self,
        author_id: Uuid,
        post_id: Uuid,
        request: CreatePostRequest,
    ) -> Result<CommentDto, AppError> {
        let parent = self.find_parent(post_id).await?;
        self.access.visible_author(author_id, parent.author_id).await?;

        let comment = self
            .post_repo
            .create(&Post::new_comment(
                author_id,
                post_id,
                request.content,
                request.images,
            ))
            .await?;

        tracing::info!(post_id = %post_id, comment_id = %comment.id, author_id = %author_id, "Comment created");
        CommentDto::from_post(comment, None)
            .ok_or_else(|| AppError::Internal("Comment without parent".into()))
    }

    async fn delete(&self, user_id: Uuid, comment_id: Uuid) -> Result<(), AppError> {
        let comment = self.find_comment(comment_id).await?;
        if comment.author_id != user_id {
            return Err(AppError::Forbidden(
                "Only the author can delete this comment".into(),
            ));
        }

        self.post_repo.delete(comment_id).await?;
        tracing::info!(comment_id = %comment_id, author_id = %user_id, "Comment deleted");
        Ok(())
    }
}
