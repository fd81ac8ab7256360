//! Comment API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use uuid::Uuid;

use social_server::application::dto::{CommentDto, PostCommentsDto};
use social_server::domain::Visibility;

use crate::common::TestApp;

#[tokio::test]
async fn test_comment_increments_parent_counter() {
    let app = TestApp::new();
    let alice = app.signup().await;
    let bob = app.signup().await;
    let post = app.create_post(&alice).await;

    let response = app.comment(&bob, post.id, "first!").await;

    response.assert_status(StatusCode::CREATED);
    let comment: CommentDto = response.json();
    assert_eq!(comment.parent_post_id, post.id);
    assert_eq!(comment.post.author_id, bob.id);
    assert_eq!(app.store.post(post.id).map(|p| p.qty_comments), Some(1));
}

#[tokio::test]
async fn test_deleting_comment_decrements_parent_once() {
    let app = TestApp::new();
    let alice = app.signup().await;
    let bob = app.signup().await;
    let post = app.create_post(&alice).await;
    let first: CommentDto = app.comment(&bob, post.id, "one").await.json();
    app.comment(&bob, post.id, "two")
        .await
        .assert_status(StatusCode::CREATED);
    assert_eq!(app.store.post(post.id).map(|p| p.qty_comments), Some(2));

    let path = format!("/api/comment/{}", first.post.id);
    app.server
        .delete(&path)
        .authorization_bearer(&bob.token)
        .await
        .assert_status_ok();
    assert_eq!(app.store.post(post.id).map(|p| p.qty_comments), Some(1));

    app.server
        .delete(&path)
        .authorization_bearer(&bob.token)
        .await
        .assert_status(StatusCode::NOT_FOUND);
    assert_eq!(app.store.post(post.id).map(|p| p.qty_comments), Some(1));
}

#[tokio::test]
async fn test_only_comment_author_can_delete() {
    let app = TestApp::new();
    let alice = app.signup().await;
    let bob = app.signup().await;
    let post = app.create_post(&alice).await;
    let comment: CommentDto = app.comment(&bob, post.id, "mine").await.json();

    app.server
        .delete(&format!("/api/comment/{}", comment.post.id))
        .authorization_bearer(&alice.token)
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_top_level_post_cannot_be_deleted_as_comment() {
    let app = TestApp::new();
    let alice = app.signup().await;
    let post = app.create_post(&alice).await;

    app.server
        .delete(&format!("/api/comment/{}", post.id))
        .authorization_bearer(&alice.token)
        .await
        .assert_status(StatusCode::NOT_FOUND);
    assert!(app.store.post(post.id).is_some());
}

#[tokio::test]
async fn test_comment_on_missing_post_is_not_found() {
    let app = TestApp::new();
    let alice = app.signup().await;

    app.comment(&alice, Uuid::now_v7(), "hello?")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_comment_on_private_post_requires_follow() {
    let app = TestApp::new();
    let author = app.signup().await;
    let reader = app.signup().await;
    app.set_visibility(&author, Visibility::Private).await;
    let post = app.create_post(&author).await;

    app.comment(&reader, post.id, "let me in")
        .await
        .assert_status(StatusCode::FORBIDDEN);

    app.follow(&reader, &author).await;

    app.comment(&reader, post.id, "thanks")
        .await
        .assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn test_get_comments_hides_unreadable_commenters() {
    let app = TestApp::new();
    let author = app.signup().await;
    let reader = app.signup().await;
    let private = app.signup().await;
    let post = app.create_post(&author).await;
    let visible: CommentDto = app.comment(&author, post.id, "visible").await.json();
    app.comment(&private, post.id, "secret")
        .await
        .assert_status(StatusCode::CREATED);
    app.set_visibility(&private, Visibility::Private).await;

    let response = app.get(&reader, &format!("/api/comment/{}", post.id)).await;

    response.assert_status_ok();
    let body: PostCommentsDto = response.json();
    assert_eq!(body.parent_post.post.id, post.id);
    assert_eq!(body.parent_post.post.qty_comments, 2);
    let ids: Vec<_> = body.comments.iter().map(|c| c.post.id).collect();
    assert_eq!(ids, vec![visible.post.id]);
    assert_eq!(
        body.comments[0].author.as_ref().map(|a| a.id),
        Some(author.id)
    );
}

#[tokio::test]
async fn test_get_comment_by_id_and_by_user() {
    let app = TestApp::new();
    let alice = app.signup().await;
    let bob = app.signup().await;
    let post = app.create_post(&alice).await;
    let comment: CommentDto = app.comment(&bob, post.id, "hi").await.json();

    let fetched: CommentDto = app
        .get(&alice, &format!("/api/comment/by_id/{}", comment.post.id))
        .await
        .json();
    assert_eq!(fetched.post.content, "hi");
    assert_eq!(fetched.author.map(|a| a.id), Some(bob.id));

    let by_user: Vec<CommentDto> = app
        .get(&alice, &format!("/api/comment/by_user/{}", bob.id))
        .await
        .json();
    assert_eq!(by_user.len(), 1);
    assert_eq!(by_user[0].parent_post_id, post.id);

    app.get(&alice, &format!("/api/comment/by_id/{}", post.id))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_deleting_post_removes_its_comments() {
    let app = TestApp::new();
    let alice = app.signup().await;
    let bob = app.signup().await;
    let post = app.create_post(&alice).await;
    let comment: CommentDto = app.comment(&bob, post.id, "bye").await.json();

    app.server
        .delete(&format!("/api/post/{}", post.id))
        .authorization_bearer(&alice.token)
        .await
        .assert_status_ok();

    assert!(app.store.post(comment.post.id).is_none());
}
