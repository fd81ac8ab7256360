//! Message API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

use social_server::application::dto::MessageDto;
use social_server::domain::services::MessagingPolicy;

use crate::common::{TestApp, TestUser};

async fn send(app: &TestApp, from: &TestUser, to: Uuid, content: &str) -> axum_test::TestResponse {
    app.server
        .post(&format!("/api/message/{}", to))
        .authorization_bearer(&from.token)
        .json(&json!({ "content": content }))
        .await
}

#[tokio::test]
async fn test_send_without_follow_is_forbidden_and_not_stored() {
    let app = TestApp::new();
    let alice = app.signup().await;
    let bob = app.signup().await;

    send(&app, &alice, bob.id, "hi")
        .await
        .assert_status(StatusCode::FORBIDDEN);

    assert_eq!(app.store.message_count(), 0);
}

#[tokio::test]
async fn test_send_with_follow_persists_message() {
    let app = TestApp::new();
    let alice = app.signup().await;
    let bob = app.signup().await;
    app.follow(&alice, &bob).await;

    let response = send(&app, &alice, bob.id, "hi").await;

    response.assert_status(StatusCode::CREATED);
    let message: MessageDto = response.json();
    assert_eq!(message.sender_id, alice.id);
    assert_eq!(message.receiver_id, bob.id);
    assert_eq!(message.content, "hi");
    assert_eq!(app.store.message_count(), 1);
}

#[tokio::test]
async fn test_default_policy_is_one_directional() {
    let app = TestApp::new();
    let alice = app.signup().await;
    let bob = app.signup().await;
    app.follow(&alice, &bob).await;

    send(&app, &bob, alice.id, "back at you")
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_mutual_policy_requires_both_edges() {
    let app = TestApp::with_policy(MessagingPolicy::Mutual);
    let alice = app.signup().await;
    let bob = app.signup().await;
    app.follow(&alice, &bob).await;

    send(&app, &alice, bob.id, "hi")
        .await
        .assert_status(StatusCode::FORBIDDEN);

    app.follow(&bob, &alice).await;

    send(&app, &alice, bob.id, "hi")
        .await
        .assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn test_send_to_self_or_unknown_user() {
    let app = TestApp::new();
    let alice = app.signup().await;

    send(&app, &alice, alice.id, "me")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    send(&app, &alice, Uuid::now_v7(), "anyone?")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_blank_message_is_rejected() {
    let app = TestApp::new();
    let alice = app.signup().await;
    let bob = app.signup().await;
    app.follow(&alice, &bob).await;

    send(&app, &alice, bob.id, "   ")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(app.store.message_count(), 0);
}

#[tokio::test]
async fn test_conversation_contains_both_directions_newest_first() {
    let app = TestApp::new();
    let alice = app.signup().await;
    let bob = app.signup().await;
    let carol = app.signup().await;
    app.follow(&alice, &bob).await;
    app.follow(&bob, &alice).await;
    app.follow(&alice, &carol).await;

    send(&app, &alice, bob.id, "one").await.assert_status(StatusCode::CREATED);
    send(&app, &bob, alice.id, "two").await.assert_status(StatusCode::CREATED);
    send(&app, &alice, carol.id, "elsewhere")
        .await
        .assert_status(StatusCode::CREATED);
    send(&app, &alice, bob.id, "three").await.assert_status(StatusCode::CREATED);

    let messages: Vec<MessageDto> = app
        .get(&bob, &format!("/api/message/chat/{}", alice.id))
        .await
        .json();
    let contents: Vec<_> = messages.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, vec!["three", "two", "one"]);

    let older: Vec<MessageDto> = app
        .get(
            &bob,
            &format!("/api/message/chat/{}?limit=1&after={}", alice.id, messages[0].id),
        )
        .await
        .json();
    assert_eq!(older.len(), 1);
    assert_eq!(older[0].content, "two");
}

#[tokio::test]
async fn test_message_access_is_limited_to_participants() {
    let app = TestApp::new();
    let alice = app.signup().await;
    let bob = app.signup().await;
    let eve = app.signup().await;
    app.follow(&alice, &bob).await;
    let message: MessageDto = send(&app, &alice, bob.id, "private").await.json();
    let path = format!("/api/message/{}", message.id);

    app.get(&bob, &path).await.assert_status_ok();
    app.get(&eve, &path).await.assert_status(StatusCode::FORBIDDEN);

    app.server
        .delete(&path)
        .authorization_bearer(&bob.token)
        .await
        .assert_status(StatusCode::FORBIDDEN);
    app.server
        .delete(&path)
        .authorization_bearer(&alice.token)
        .await
        .assert_status_ok();
    app.get(&alice, &path).await.assert_status(StatusCode::NOT_FOUND);
}
