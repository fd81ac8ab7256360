//! Application Startup
//!
//! Application building and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;

use crate::application::services::{
    AuthService, AuthServiceImpl, CommentService, CommentServiceImpl, ContentAccess,
    FollowerService, FollowerServiceImpl, MessageService, MessageServiceImpl, PostService,
    PostServiceImpl, ReactionService, ReactionServiceImpl, TokenService, UserService,
    UserServiceImpl,
};
use crate::config::Settings;
use crate::infrastructure::database;
use crate::infrastructure::repositories::Repositories;
use crate::presentation::http::{handlers::health, routes};
use crate::presentation::middleware::{create_cors_layer, create_trace_layer};
use crate::presentation::websocket::Gateway;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<dyn AuthService>,
    pub users: Arc<dyn UserService>,
    pub posts: Arc<dyn PostService>,
    pub comments: Arc<dyn CommentService>,
    pub reactions: Arc<dyn ReactionService>,
    pub followers: Arc<dyn FollowerService>,
    pub messages: Arc<dyn MessageService>,
    pub tokens: Arc<TokenService>,
    pub gateway: Arc<Gateway>,
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Wire every service on top of one set of repositories.
    pub fn new(settings: Settings, repos: Repositories) -> Self {
        let tokens = Arc::new(TokenService::new(&settings.jwt));
        let access = ContentAccess::new(repos.users.clone(), repos.follows.clone());

        Self {
            auth: Arc::new(AuthServiceImpl::new(repos.users.clone(), tokens.clone())),
            users: Arc::new(UserServiceImpl::new(
                repos.users.clone(),
                repos.follows.clone(),
            )),
            posts: Arc::new(PostServiceImpl::new(repos.posts.clone(), access.clone())),
            comments: Arc::new(CommentServiceImpl::new(repos.posts.clone(), access.clone())),
            reactions: Arc::new(ReactionServiceImpl::new(
                repos.reactions.clone(),
                repos.posts.clone(),
                access,
            )),
            followers: Arc::new(FollowerServiceImpl::new(
                repos.follows.clone(),
                repos.users.clone(),
            )),
            messages: Arc::new(MessageServiceImpl::new(
                repos.messages,
                repos.users,
                repos.follows,
                settings.messaging.policy,
            )),
            tokens,
            gateway: Arc::new(Gateway::new(settings.websocket.heartbeat_interval_ms)),
            settings: Arc::new(settings),
        }
    }
}

/// Router with the full middleware stack
pub fn build_router(state: AppState) -> Router {
    let cors = create_cors_layer(&state.settings.cors);

    routes::create_router(state)
        .layer(CompressionLayer::new())
        .layer(create_trace_layer())
        .layer(cors)
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        health::init_server_start();

        let db = database::create_pool(&settings.database).await?;
        tracing::info!("Database connection pool created");

        if settings.database.run_migrations {
            database::run_migrations(&db).await?;
            tracing::info!("Database migrations applied");
        }

        let addr = settings.server.socket_addr()?;
        let state = AppState::new(settings, Repositories::postgres(db));
        tracing::info!(
            policy = ?state.settings.messaging.policy,
            "Messaging policy configured"
        );

        let router = build_router(state);

        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Listening on {}", listener.local_addr()?);

        Ok(Self { listener, router })
    }

    /// Run the server until stopped
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(self.listener, self.router).await?;
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}
