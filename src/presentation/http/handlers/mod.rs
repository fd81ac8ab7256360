//! HTTP Handlers
//!
//! Request handlers for all HTTP endpoints.

pub mod auth;
pub mod comment;
pub mod follower;
pub mod health;
pub mod message;
pub mod post;
pub mod reaction;
pub mod user;

use crate::application::dto::{CursorQuery, OffsetQuery};
use crate::config::PaginationSettings;
use crate::domain::{CursorPagination, OffsetPagination};

/// Keyset page from `?limit&before&after`, clamped to the configured limits
pub(crate) fn cursor_page(settings: &PaginationSettings, query: CursorQuery) -> CursorPagination {
    CursorPagination::new(
        query.limit,
        query.before,
        query.after,
        settings.default_limit,
        settings.max_limit,
    )
}

/// Offset page from `?limit&skip`
pub(crate) fn offset_page(settings: &PaginationSettings, query: OffsetQuery) -> OffsetPagination {
    OffsetPagination::new(
        query.limit,
        query.skip,
        settings.default_limit,
        settings.max_limit,
    )
}
