//! WebSocket Connection Handler
//!
//! The token is checked during the HTTP handshake, before the upgrade, so an
//! unauthenticated client never reaches a room. After the upgrade one task
//! reads frames and runs their handlers to completion while a writer task
//! drains the session's channel into the socket.
//!
//! [`on_connect`], [`on_client_text`] and [`on_disconnect`] hold the session
//! protocol and know nothing about the socket itself.

use std::time::Duration;

use axum::{
    extract::{
        ws::{rejection::WebSocketUpgradeRejection, Message, WebSocket},
        Query, State, WebSocketUpgrade,
    },
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
};
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;
use tokio::time::interval;
use uuid::Uuid;

use super::messages::{
    client_events, ErrorPayload, GatewayReceive, PresencePayload, ReadyPayload, ServerEvent,
};
use super::session::SessionState;
use crate::application::dto::DirectMessageRequest;
use crate::application::services::{AuthError, TokenService};
use crate::infrastructure::metrics;
use crate::shared::error::AppError;
use crate::shared::validation::validate;
use crate::startup::AppState;

/// Silence tolerated on top of the heartbeat interval
const HEARTBEAT_GRACE_MS: u64 = 10_000;

/// Handshake query string
#[derive(Debug, Default, Deserialize)]
pub struct GatewayQuery {
    pub token: Option<String>,
}

/// WebSocket upgrade handler
pub async fn ws_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<GatewayQuery>,
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Response {
    let user_id = match authenticate_handshake(&state.tokens, &headers, query.token.as_deref()) {
        Ok(user_id) => user_id,
        Err(e) => {
            tracing::debug!(error = %e, "Gateway handshake rejected");
            return AppError::from(e).into_response();
        }
    };

    let ws = match ws {
        Ok(ws) => ws,
        Err(rejection) => return rejection.into_response(),
    };

    let websocket = &state.settings.websocket;
    ws.max_message_size(websocket.max_message_size)
        .max_frame_size(websocket.max_frame_size)
        .on_upgrade(move |socket| handle_socket(socket, state, user_id))
}

/// Resolve the user behind a handshake.
///
/// The `Authorization` header (`Bearer <jwt>` or the bare token) wins over
/// the `token` query parameter.
pub fn authenticate_handshake(
    tokens: &TokenService,
    headers: &HeaderMap,
    query_token: Option<&str>,
) -> Result<Uuid, AuthError> {
    let header_token = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.strip_prefix("Bearer ").unwrap_or(value).trim())
        .filter(|value| !value.is_empty());

    let token = header_token
        .or(query_token.filter(|t| !t.is_empty()))
        .ok_or(AuthError::MissingToken)?;

    tokens.verify(token)
}

/// Handle individual WebSocket connection
async fn handle_socket(socket: WebSocket, state: AppState, user_id: Uuid) {
    let (mut sink, mut stream) = socket.split();

    let (tx, mut rx) = mpsc::unbounded_channel::<ServerEvent>();
    let (control_tx, mut control_rx) = mpsc::unbounded_channel::<Message>();

    // Spawn task to forward events and pings to the WebSocket
    let writer = tokio::spawn(async move {
        loop {
            let frame = tokio::select! {
                Some(event) = rx.recv() => match serde_json::to_string(&event) {
                    Ok(text) => Message::Text(text.into()),
                    Err(e) => {
                        tracing::error!(event = event.event_name(), error = %e, "Failed to serialize event");
                        continue;
                    }
                },
                Some(frame) = control_rx.recv() => frame,
                else => break,
            };
            if sink.send(frame).await.is_err() {
                break;
            }
        }
    });

    let mut session = on_connect(&state, user_id, tx);

    let heartbeat_interval_ms = state.gateway.heartbeat_interval();
    let mut heartbeat = interval(Duration::from_millis(heartbeat_interval_ms));
    heartbeat.tick().await; // Skip first immediate tick

    loop {
        tokio::select! {
            msg = stream.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        on_client_text(&state, &mut session, text.as_str()).await;
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        tracing::debug!(session_id = %session.session_id, "Connection closed");
                        break;
                    }
                    Some(Ok(_)) => session.heartbeat(),
                    Some(Err(e)) => {
                        tracing::debug!(session_id = %session.session_id, error = %e, "WebSocket error");
                        break;
                    }
                }
            }

            _ = heartbeat.tick() => {
                if !session.is_alive(heartbeat_interval_ms + HEARTBEAT_GRACE_MS) {
                    tracing::info!(
                        session_id = %session.session_id,
                        "Heartbeat timeout, closing connection"
                    );
                    break;
                }
                if control_tx.send(Message::Ping(Default::default())).is_err() {
                    break;
                }
            }
        }
    }

    on_disconnect(&state, &session);
    writer.abort();
}

/// Join the user's room, greet the new session and announce it to the others.
pub fn on_connect(
    state: &AppState,
    user_id: Uuid,
    sender: mpsc::UnboundedSender<ServerEvent>,
) -> SessionState {
    let session = SessionState::new(user_id);
    let gateway = &state.gateway;

    gateway.join(session.session_id.clone(), user_id, sender);
    gateway.send_to_session(
        &session.session_id,
        ServerEvent::Ready(ReadyPayload {
            user_id,
            session_id: session.session_id.clone(),
        }),
    );
    gateway.broadcast_except(
        &session.session_id,
        ServerEvent::UserConnected(PresencePayload {
            user_id,
            session_id: Some(session.session_id.clone()),
        }),
    );

    tracing::info!(user_id = %user_id, session_id = %session.session_id, "User connected");
    session
}

/// Handle one text frame from the client.
///
/// Failures are answered with an `error` event to this session only; the
/// connection stays open.
pub async fn on_client_text(state: &AppState, session: &mut SessionState, text: &str) {
    session.heartbeat();

    let frame = match serde_json::from_str::<GatewayReceive>(text) {
        Ok(frame) => frame,
        Err(e) => {
            reject(
                state,
                session,
                "unknown",
                AppError::BadRequest(format!("Malformed frame: {}", e)),
            );
            return;
        }
    };

    let result = match frame.event.as_str() {
        client_events::PING => {
            state.gateway.send_to_session(&session.session_id, ServerEvent::Pong);
            Ok(())
        }
        client_events::MESSAGE => handle_send(state, session, frame.data).await,
        other => Err(AppError::BadRequest(format!("Unknown event '{}'", other))),
    };

    match result {
        Ok(()) => metrics::record_gateway_event(&frame.event, true),
        Err(e) => reject(state, session, &frame.event, e),
    }
}

/// Leave the room and tell the remaining sessions.
pub fn on_disconnect(state: &AppState, session: &SessionState) {
    if state.gateway.leave(&session.session_id).is_none() {
        return;
    }

    state.gateway.broadcast_except(
        &session.session_id,
        ServerEvent::UserDisconnected(PresencePayload {
            user_id: session.user_id,
            session_id: None,
        }),
    );

    tracing::info!(
        user_id = %session.user_id,
        session_id = %session.session_id,
        "User disconnected"
    );
}

/// The sender is always the session's user; a client supplied sender is ignored.
async fn handle_send(
    state: &AppState,
    session: &SessionState,
    data: Option<serde_json::Value>,
) -> Result<(), AppError> {
    let request: DirectMessageRequest =
        serde_json::from_value(data.unwrap_or(serde_json::Value::Null))
            .map_err(|e| AppError::BadRequest(format!("Invalid message payload: {}", e)))?;
    validate(&request)?;

    let message = state
        .messages
        .send(session.user_id, request.receiver_id, request.content)
        .await?;

    state.gateway.deliver_message(message);
    metrics::record_message_delivered("gateway");
    Ok(())
}

fn reject(state: &AppState, session: &SessionState, event: &str, error: AppError) {
    tracing::debug!(
        session_id = %session.session_id,
        event = event,
        error = %error,
        "Client event rejected"
    );
    metrics::record_gateway_event(event, false);
    state.gateway.send_to_session(
        &session.session_id,
        ServerEvent::Error(ErrorPayload::new(event, &error)),
    );
}
