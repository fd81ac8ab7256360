//! Route Configuration
//!
//! Configures all HTTP routes for the API. Everything under `/api` except
//! `/api/auth` requires a bearer token.

use axum::{
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Router,
};

use super::handlers;
use crate::infrastructure::metrics;
use crate::presentation::middleware::{auth_middleware, track_metrics};
use crate::presentation::websocket::ws_handler;
use crate::startup::AppState;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api", api_routes(state.clone()))
        // WebSocket gateway, authenticated during the handshake
        .route("/gateway", get(ws_handler))
        .route("/health", get(handlers::health::health_check))
        .route("/health/live", get(handlers::health::liveness))
        .route("/metrics", get(metrics_handler))
        .layer(middleware::from_fn(track_metrics))
        .with_state(state)
}

/// Prometheus metrics endpoint handler
async fn metrics_handler() -> impl IntoResponse {
    let metrics = metrics::gather_metrics();
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        metrics,
    )
}

fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/user", user_routes(state.clone()))
        .nest("/post", post_routes(state.clone()))
        .nest("/comment", comment_routes(state.clone()))
        .nest("/reaction", reaction_routes(state.clone()))
        .nest("/follower", follower_routes(state.clone()))
        .nest("/message", message_routes(state))
}

/// Authentication routes (public)
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(handlers::auth::signup))
        .route("/login", post(handlers::auth::login))
}

fn user_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::user::get_recommendations)
                .put(handlers::user::update_current_user)
                .delete(handlers::user::delete_current_user),
        )
        .route("/me", get(handlers::user::get_current_user))
        .route("/by_username/{username}", get(handlers::user::search_by_username))
        .route("/{id}", get(handlers::user::get_user))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

fn post_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::post::get_feed).post(handlers::post::create_post),
        )
        .route("/by_user/{id}", get(handlers::post::get_by_user))
        .route(
            "/{id}",
            get(handlers::post::get_post).delete(handlers::post::delete_post),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// `/{id}` is a post id for GET and POST, a comment id for DELETE
fn comment_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/by_id/{id}", get(handlers::comment::get_comment))
        .route("/by_user/{id}", get(handlers::comment::get_by_user))
        .route(
            "/{id}",
            get(handlers::comment::get_comments)
                .post(handlers::comment::create_comment)
                .delete(handlers::comment::delete_comment),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

fn reaction_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/likes", get(handlers::reaction::get_likes))
        .route("/retweets", get(handlers::reaction::get_retweets))
        .route("/post/{id}", get(handlers::reaction::get_by_post))
        .route(
            "/{id}",
            post(handlers::reaction::react).delete(handlers::reaction::unreact),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

fn follower_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/follow/{id}", post(handlers::follower::follow))
        .route("/unfollow/{id}", post(handlers::follower::unfollow))
        .route("/following", get(handlers::follower::get_following))
        .route("/followers", get(handlers::follower::get_followers))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// `/{id}` is a user id for POST, a message id for GET and DELETE
fn message_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/chat/{id}", get(handlers::message::get_conversation))
        .route(
            "/{id}",
            get(handlers::message::get_message)
                .post(handlers::message::send_message)
                .delete(handlers::message::delete_message),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
