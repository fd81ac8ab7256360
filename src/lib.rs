//! # Social Server Library
//!
//! This crate provides a social network backend with:
//! - RESTful HTTP API for accounts, posts, comments, reactions, follows and messages
//! - WebSocket gateway for real-time direct messages and presence
//! - PostgreSQL for persistent storage
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **Domain Layer**: Core business entities, rules and repository traits
//! - **Application Layer**: Business logic services and DTOs
//! - **Infrastructure Layer**: Database repositories and metrics
//! - **Presentation Layer**: HTTP handlers and WebSocket gateway
//!
//! ## Module Structure
//!
//! ```text
//! social_server/
//! +-- config/         Configuration management
//! +-- domain/         Entities, value objects, visibility and messaging rules
//! +-- application/    Application services and DTOs
//! +-- infrastructure/ PostgreSQL repositories, Prometheus metrics
//! +-- presentation/   HTTP routes and WebSocket gateway
//! +-- shared/         Errors and validation
//! ```

// Configuration module
pub mod config;

// Domain layer - Core business logic
pub mod domain;

// Application layer - Business services
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP and WebSocket handlers
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
