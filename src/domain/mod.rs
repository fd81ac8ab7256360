//! # Domain Layer
//!
//! Entities, repository traits and the pure rules of the social network.
//! Nothing here knows about HTTP, WebSockets or SQL.
//!
//! - **entities**: User, Follow, Post, Reaction, Message and their repositories
//! - **value_objects**: page requests
//! - **services**: visibility and messaging rules

pub mod entities;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use value_objects::*;
