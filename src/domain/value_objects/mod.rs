//! # Domain Value Objects
//!
//! Immutable value types that represent domain concepts without identity.
//!
//! - **Pagination**: keyset (`before`/`after`) and offset (`limit`/`skip`) page requests

mod pagination;

pub use pagination::*;
