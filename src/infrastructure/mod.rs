//! Infrastructure Layer
//!
//! Contains implementations for external services including:
//! - PostgreSQL pool and migrations
//! - Database repositories (PostgreSQL)
//! - Prometheus metrics

pub mod database;
pub mod metrics;
pub mod repositories;
