//! Page requests for list queries.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Position of a keyset page relative to a cursor row.
///
/// Lists are ordered newest first. `After` walks towards older rows,
/// `Before` returns rows newer than the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cursor {
    Before(Uuid),
    After(Uuid),
}

/// Keyset pagination over `(created_at, id)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorPagination {
    pub limit: u32,
    pub cursor: Option<Cursor>,
}

impl CursorPagination {
    /// Build a page request, clamping `limit` into `1..=max_limit`.
    ///
    /// When both cursors are supplied `after` wins.
    pub fn new(
        limit: Option<u32>,
        before: Option<Uuid>,
        after: Option<Uuid>,
        default_limit: u32,
        max_limit: u32,
    ) -> Self {
        let cursor = match (after, before) {
            (Some(id), _) => Some(Cursor::After(id)),
            (None, Some(id)) => Some(Cursor::Before(id)),
            (None, None) => None,
        };
        Self {
            limit: clamp_limit(limit, default_limit, max_limit),
            cursor,
        }
    }

    /// First page with the given size.
    pub fn first(limit: u32) -> Self {
        Self {
            limit: limit.max(1),
            cursor: None,
        }
    }
}

/// Limit/skip pagination for search style listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetPagination {
    pub limit: u32,
    pub skip: u32,
}

impl OffsetPagination {
    pub fn new(limit: Option<u32>, skip: Option<u32>, default_limit: u32, max_limit: u32) -> Self {
        Self {
            limit: clamp_limit(limit, default_limit, max_limit),
            skip: skip.unwrap_or(0),
        }
    }
}

fn clamp_limit(limit: Option<u32>, default_limit: u32, max_limit: u32) -> u32 {
    limit.unwrap_or(default_limit).clamp(1, max_limit.max(1))
}
