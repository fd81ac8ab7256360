//! Common Test Utilities
//!
//! Shared helpers, fixtures, and test infrastructure. The real router and
//! services run on top of [`InMemoryStore`], so no database is needed.

pub mod memory;

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::{TestResponse, TestServer};
use fake::faker::lorem::en::Sentence;
use fake::faker::name::en::Name;
use fake::Fake;
use serde_json::{json, Value};
use tokio::sync::mpsc;
use uuid::Uuid;

use social_server::application::dto::{PostDto, TokenResponse};
use social_server::config::{
    CorsSettings, DatabaseSettings, JwtSettings, MessagingSettings, PaginationSettings,
    ServerSettings, Settings, WebSocketSettings,
};
use social_server::domain::services::MessagingPolicy;
use social_server::domain::Visibility;
use social_server::infrastructure::repositories::Repositories;
use social_server::presentation::websocket::{on_connect, ServerEvent, SessionState};
use social_server::startup::{build_router, AppState};

pub use memory::InMemoryStore;

pub const PASSWORD: &str = "Sup3r$ecret";

/// Settings that touch neither files nor the environment
pub fn test_settings() -> Settings {
    Settings {
        server: ServerSettings {
            host: "127.0.0.1".into(),
            port: 0,
        },
        database: DatabaseSettings {
            url: "postgres://unused".into(),
            max_connections: 1,
            min_connections: 0,
            acquire_timeout: 1,
            run_migrations: false,
        },
        jwt: JwtSettings {
            secret: "integration-test-secret-0123456789abcdef".into(),
            access_token_expiry_minutes: 60,
        },
        cors: CorsSettings {
            allowed_origins: vec![],
        },
        websocket: WebSocketSettings {
            max_message_size: 65536,
            max_frame_size: 16384,
            heartbeat_interval_ms: 25000,
        },
        messaging: MessagingSettings {
            policy: MessagingPolicy::SenderFollowsReceiver,
        },
        pagination: PaginationSettings {
            default_limit: 20,
            max_limit: 100,
        },
        environment: "test".into(),
    }
}

/// A signed-up account
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: Uuid,
    pub username: String,
    pub token: String,
}

/// Test application: router, state and the store behind it
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    pub store: Arc<InMemoryStore>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_settings(test_settings())
    }

    pub fn with_policy(policy: MessagingPolicy) -> Self {
        let mut settings = test_settings();
        settings.messaging.policy = policy;
        Self::with_settings(settings)
    }

    pub fn with_settings(settings: Settings) -> Self {
        let store = Arc::new(InMemoryStore::new());
        let repos = Repositories {
            users: store.clone(),
            follows: store.clone(),
            posts: store.clone(),
            reactions: store.clone(),
            messages: store.clone(),
        };
        let state = AppState::new(settings, repos);
        let server = TestServer::new(build_router(state.clone())).expect("test server");

        Self {
            server,
            state,
            store,
        }
    }

    /// Sign up a fresh account and return it with its token
    pub async fn signup(&self) -> TestUser {
        let username = format!("user_{}", &Uuid::new_v4().simple().to_string()[..10]);
        let name: String = Name().fake();
        let response = self
            .server
            .post("/api/auth/signup")
            .json(&json!({
                "name": name,
                "username": username,
                "email": format!("{}@example.com", username),
                "password": PASSWORD,
            }))
            .await;
        response.assert_status(StatusCode::CREATED);

        let token = response.json::<TokenResponse>().token;
        let id = self.state.tokens.verify(&token).expect("issued token verifies");

        TestUser {
            id,
            username,
            token,
        }
    }

    pub async fn follow(&self, follower: &TestUser, followed: &TestUser) {
        self.server
            .post(&format!("/api/follower/follow/{}", followed.id))
            .authorization_bearer(&follower.token)
            .await
            .assert_status(StatusCode::CREATED);
    }

    pub async fn set_visibility(&self, user: &TestUser, visibility: Visibility) {
        self.server
            .put("/api/user")
            .authorization_bearer(&user.token)
            .json(&json!({ "visibility": visibility }))
            .await
            .assert_status_ok();
    }

    pub async fn create_post(&self, author: &TestUser) -> PostDto {
        let content: String = Sentence(3..8).fake();
        self.create_post_with(author, &content).await
    }

    pub async fn create_post_with(&self, author: &TestUser, content: &str) -> PostDto {
        let response = self
            .server
            .post("/api/post")
            .authorization_bearer(&author.token)
            .json(&json!({ "content": content }))
            .await;
        response.assert_status(StatusCode::CREATED);
        response.json()
    }

    pub async fn comment(&self, author: &TestUser, post_id: Uuid, content: &str) -> TestResponse {
        self.server
            .post(&format!("/api/comment/{}", post_id))
            .authorization_bearer(&author.token)
            .json(&json!({ "content": content }))
            .await
    }

    pub async fn get(&self, user: &TestUser, path: &str) -> TestResponse {
        self.server.get(path).authorization_bearer(&user.token).await
    }

    /// Attach a gateway session for `user` without a socket
    pub fn connect(&self, user: &TestUser) -> GatewayClient {
        let (tx, rx) = mpsc::unbounded_channel();
        let session = on_connect(&self.state, user.id, tx);
        GatewayClient { session, rx }
    }
}

/// A gateway session and the events queued for it
pub struct GatewayClient {
    pub session: SessionState,
    pub rx: mpsc::UnboundedReceiver<ServerEvent>,
}

impl GatewayClient {
    /// Everything queued so far
    pub fn drain(&mut self) -> Vec<ServerEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            events.push(event);
        }
        events
    }

    /// Queued events as `{"event", "data"}` JSON frames
    pub fn drain_frames(&mut self) -> Vec<Value> {
        self.drain()
            .into_iter()
            .map(|event| serde_json::to_value(event).expect("event serializes"))
            .collect()
    }
}
