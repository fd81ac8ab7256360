//! Gateway Tests
//!
//! Sessions are attached through the connection protocol directly; only the
//! handshake goes through HTTP.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use social_server::presentation::websocket::{on_client_text, on_disconnect};

use crate::common::{GatewayClient, TestApp, TestUser};

fn message_frame(to: &TestUser, content: &str) -> String {
    json!({ "event": "message", "data": { "receiverId": to.id, "content": content } })
        .to_string()
}

fn events(frames: &[Value]) -> Vec<&str> {
    frames
        .iter()
        .filter_map(|frame| frame["event"].as_str())
        .collect()
}

async fn send_text(app: &TestApp, client: &mut GatewayClient, text: &str) {
    on_client_text(&app.state, &mut client.session, text).await;
}

// ============================================================================
// Handshake
// ============================================================================

#[tokio::test]
async fn test_handshake_without_token_is_unauthorized() {
    let app = TestApp::new();

    app.server
        .get("/gateway")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_handshake_with_invalid_token_is_unauthorized() {
    let app = TestApp::new();

    app.server
        .get("/gateway?token=not-a-jwt")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    app.server
        .get("/gateway")
        .authorization_bearer("not-a-jwt")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Presence
// ============================================================================

#[tokio::test]
async fn test_connect_sends_ready_and_announces_presence() {
    let app = TestApp::new();
    let alice = app.signup().await;
    let bob = app.signup().await;
    let mut first = app.connect(&alice);

    let mut second = app.connect(&bob);

    let frames = second.drain_frames();
    assert_eq!(events(&frames), vec!["ready"]);
    assert_eq!(frames[0]["data"]["userId"], json!(bob.id));
    assert_eq!(frames[0]["data"]["sessionId"], json!(second.session.session_id));

    let frames = first.drain_frames();
    assert_eq!(events(&frames), vec!["ready", "user connected"]);
    assert_eq!(frames[1]["data"]["userId"], json!(bob.id));
    assert_eq!(app.state.gateway.session_count(), 2);
}

#[tokio::test]
async fn test_disconnect_is_announced_once() {
    let app = TestApp::new();
    let alice = app.signup().await;
    let bob = app.signup().await;
    let mut watcher = app.connect(&alice);
    let leaving = app.connect(&bob);
    watcher.drain();

    on_disconnect(&app.state, &leaving.session);
    on_disconnect(&app.state, &leaving.session);

    let frames = watcher.drain_frames();
    assert_eq!(events(&frames), vec!["user disconnected"]);
    assert_eq!(frames[0]["data"]["userId"], json!(bob.id));
    assert!(!app.state.gateway.is_online(bob.id));
}

// ============================================================================
// Messages
// ============================================================================

#[tokio::test]
async fn test_message_reaches_every_session_of_both_users() {
    let app = TestApp::new();
    let alice = app.signup().await;
    let bob = app.signup().await;
    let carol = app.signup().await;
    app.follow(&alice, &bob).await;

    let mut alice_phone = app.connect(&alice);
    let mut alice_laptop = app.connect(&alice);
    let mut bob_session = app.connect(&bob);
    let mut bystander = app.connect(&carol);
    for client in [&mut alice_phone, &mut alice_laptop, &mut bob_session, &mut bystander] {
        client.drain();
    }

    send_text(&app, &mut alice_phone, &message_frame(&bob, "hello bob")).await;

    for client in [&mut alice_phone, &mut alice_laptop, &mut bob_session] {
        let frames = client.drain_frames();
        assert_eq!(events(&frames), vec!["message"]);
        assert_eq!(frames[0]["data"]["content"], "hello bob");
        assert_eq!(frames[0]["data"]["senderId"], json!(alice.id));
        assert_eq!(frames[0]["data"]["from"], json!(alice.id));
        assert_eq!(frames[0]["data"]["receiverId"], json!(bob.id));
    }
    assert!(bystander.drain().is_empty());
    assert_eq!(app.store.message_count(), 1);
}

#[tokio::test]
async fn test_forbidden_message_only_errors_the_sender() {
    let app = TestApp::new();
    let alice = app.signup().await;
    let bob = app.signup().await;
    let mut sender = app.connect(&alice);
    let mut receiver = app.connect(&bob);
    sender.drain();
    receiver.drain();

    send_text(&app, &mut sender, &message_frame(&bob, "no follow yet")).await;

    let frames = sender.drain_frames();
    assert_eq!(events(&frames), vec!["error"]);
    assert_eq!(frames[0]["data"]["event"], "message");
    assert_eq!(frames[0]["data"]["status"], 403);
    assert!(receiver.drain().is_empty());
    assert_eq!(app.store.message_count(), 0);

    app.follow(&alice, &bob).await;
    send_text(&app, &mut sender, &message_frame(&bob, "now allowed")).await;

    assert_eq!(events(&sender.drain_frames()), vec!["message"]);
    assert_eq!(events(&receiver.drain_frames()), vec!["message"]);
}

#[tokio::test]
async fn test_invalid_message_payload_lists_field_errors() {
    let app = TestApp::new();
    let alice = app.signup().await;
    let bob = app.signup().await;
    app.follow(&alice, &bob).await;
    let mut client = app.connect(&alice);
    client.drain();

    send_text(&app, &mut client, &message_frame(&bob, "   ")).await;

    let frames = client.drain_frames();
    assert_eq!(events(&frames), vec!["error"]);
    assert_eq!(frames[0]["data"]["status"], 400);
    assert_eq!(frames[0]["data"]["errors"][0]["field"], "content");
}

#[tokio::test]
async fn test_client_supplied_sender_is_ignored() {
    let app = TestApp::new();
    let alice = app.signup().await;
    let bob = app.signup().await;
    let mallory = app.signup().await;
    app.follow(&alice, &bob).await;
    let mut client = app.connect(&mallory);
    client.drain();

    let frame = json!({
        "event": "message",
        "data": { "senderId": alice.id, "receiverId": bob.id, "content": "spoofed" }
    });
    send_text(&app, &mut client, &frame.to_string()).await;

    let frames = client.drain_frames();
    assert_eq!(events(&frames), vec!["error"]);
    assert_eq!(frames[0]["data"]["status"], 403);
}

#[tokio::test]
async fn test_rest_send_fans_out_to_gateway() {
    let app = TestApp::new();
    let alice = app.signup().await;
    let bob = app.signup().await;
    app.follow(&alice, &bob).await;
    let mut receiver = app.connect(&bob);
    receiver.drain();

    app.server
        .post(&format!("/api/message/{}", bob.id))
        .authorization_bearer(&alice.token)
        .json(&json!({ "content": "over http" }))
        .await
        .assert_status(StatusCode::CREATED);

    let frames = receiver.drain_frames();
    assert_eq!(events(&frames), vec!["message"]);
    assert_eq!(frames[0]["data"]["content"], "over http");
}

// ============================================================================
// Protocol
// ============================================================================

#[tokio::test]
async fn test_ping_gets_pong() {
    let app = TestApp::new();
    let alice = app.signup().await;
    let mut client = app.connect(&alice);
    client.drain();

    send_text(&app, &mut client, r#"{"event":"ping"}"#).await;

    assert_eq!(client.drain_frames(), vec![json!({ "event": "pong" })]);
}

#[tokio::test]
async fn test_unknown_and_malformed_frames_keep_session_open() {
    let app = TestApp::new();
    let alice = app.signup().await;
    let mut client = app.connect(&alice);
    client.drain();

    send_text(&app, &mut client, r#"{"event":"typing"}"#).await;
    send_text(&app, &mut client, "not json").await;
    send_text(&app, &mut client, r#"{"event":"ping"}"#).await;

    let frames = client.drain_frames();
    assert_eq!(events(&frames), vec!["error", "error", "pong"]);
    assert_eq!(frames[0]["data"]["event"], "typing");
    assert_eq!(frames[0]["data"]["status"], 400);
    assert_eq!(frames[1]["data"]["event"], "unknown");
    assert!(app.state.gateway.is_online(alice.id));
}
