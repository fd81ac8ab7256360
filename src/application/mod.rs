//! Application Layer
//!
//! Services holding the business rules of each domain (auth, user, post,
//! comment, reaction, follower, message) and the DTOs that cross the HTTP
//! and gateway boundaries.

pub mod dto;
pub mod services;
