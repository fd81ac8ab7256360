//! Follower API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use uuid::Uuid;

use social_server::application::dto::{FollowDto, FollowResponse};
use social_server::domain::Visibility;

use crate::common::TestApp;

#[tokio::test]
async fn test_follow_returns_edge_and_message() {
    let app = TestApp::new();
    let alice = app.signup().await;
    let bob = app.signup().await;

    let response = app
        .server
        .post(&format!("/api/follower/follow/{}", bob.id))
        .authorization_bearer(&alice.token)
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: FollowResponse = response.json();
    assert_eq!(body.message, format!("You are now following {}", bob.username));
    assert_eq!(body.follow.follower_id, alice.id);
    assert_eq!(body.follow.followed_id, bob.id);
}

#[tokio::test]
async fn test_follow_twice_is_conflict() {
    let app = TestApp::new();
    let alice = app.signup().await;
    let bob = app.signup().await;
    app.follow(&alice, &bob).await;

    app.server
        .post(&format!("/api/follower/follow/{}", bob.id))
        .authorization_bearer(&alice.token)
        .await
        .assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_follow_self_or_unknown_user_fails() {
    let app = TestApp::new();
    let alice = app.signup().await;

    app.server
        .post(&format!("/api/follower/follow/{}", alice.id))
        .authorization_bearer(&alice.token)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    app.server
        .post(&format!("/api/follower/follow/{}", Uuid::now_v7()))
        .authorization_bearer(&alice.token)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unfollow_removes_edge_once() {
    let app = TestApp::new();
    let alice = app.signup().await;
    let bob = app.signup().await;
    app.follow(&alice, &bob).await;
    let path = format!("/api/follower/unfollow/{}", bob.id);

    app.server
        .post(&path)
        .authorization_bearer(&alice.token)
        .await
        .assert_status_ok();

    app.server
        .post(&path)
        .authorization_bearer(&alice.token)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_following_and_followers_lists() {
    let app = TestApp::new();
    let alice = app.signup().await;
    let bob = app.signup().await;
    let carol = app.signup().await;
    app.follow(&alice, &bob).await;
    app.follow(&alice, &carol).await;
    app.follow(&carol, &alice).await;

    let following: Vec<FollowDto> = app.get(&alice, "/api/follower/following").await.json();
    let followed: Vec<_> = following.iter().map(|f| f.followed_id).collect();
    assert_eq!(followed, vec![carol.id, bob.id]);

    let followers: Vec<FollowDto> = app.get(&alice, "/api/follower/followers").await.json();
    assert_eq!(followers.len(), 1);
    assert_eq!(followers[0].follower_id, carol.id);
}

#[tokio::test]
async fn test_follow_hidden_user_is_not_found() {
    let app = TestApp::new();
    let alice = app.signup().await;
    let ghost = app.signup().await;
    app.set_visibility(&ghost, Visibility::Hidden).await;

    let response = app
        .server
        .post(&format!("/api/follower/follow/{}", ghost.id))
        .authorization_bearer(&alice.token)
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert!(!response.text().contains(&ghost.username));
}
