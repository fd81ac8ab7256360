//! Keyset page parameters shared by the list queries.
//!
//! UUID v7 ids sort by creation time, so `id` is the only key. Queries bind
//! both cursors and the limit and take their `ORDER BY` from [`Keyset::order`]:
//!
//! ```sql
//! AND ($n::uuid IS NULL OR x.id < $n)      -- after
//! AND ($m::uuid IS NULL OR x.id > $m)      -- before
//! ORDER BY x.id {order}
//! ```

use uuid::Uuid;

use crate::domain::{Cursor, CursorPagination};

#[derive(Debug, Clone, Copy)]
pub(super) struct Keyset {
    pub after: Option<Uuid>,
    pub before: Option<Uuid>,
    pub limit: i64,
}

impl Keyset {
    pub fn new(page: CursorPagination) -> Self {
        let (after, before) = match page.cursor {
            Some(Cursor::After(id)) => (Some(id), None),
            Some(Cursor::Before(id)) => (None, Some(id)),
            None => (None, None),
        };
        Self {
            after,
            before,
            limit: i64::from(page.limit),
        }
    }

    /// Rows right above a `before` cursor are fetched oldest first.
    pub fn order(&self) -> &'static str {
        if self.before.is_some() {
            "ASC"
        } else {
            "DESC"
        }
    }

    /// Bring a fetched page back to newest first.
    pub fn finish<T>(&self, mut rows: Vec<T>) -> Vec<T> {
        if self.before.is_some() {
            rows.reverse();
        }
        rows
    }
}
