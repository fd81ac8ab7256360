//! Read access rules derived from a user's visibility.

use uuid::Uuid;

use crate::domain::entities::{User, Visibility};

/// Decides whether one user may read another user's content.
pub struct VisibilityService;

impl VisibilityService {
    /// `viewer` may read `author`'s posts, comments and reactions when they
    /// are the author, the author is public, or the author is private and
    /// `viewer` follows them. Hidden authors are readable only by themselves.
    pub fn can_view(viewer: Uuid, author: &User, viewer_follows_author: bool) -> bool {
        if viewer == author.id {
            return true;
        }
        match author.visibility {
            Visibility::Public => true,
            Visibility::Private => viewer_follows_author,
            Visibility::Hidden => false,
        }
    }

    /// Whether the answer depends on a follow edge, so callers can skip the lookup.
    pub fn needs_follow_check(viewer: Uuid, author: &User) -> bool {
        viewer != author.id && author.visibility == Visibility::Private
    }

    /// Whether `author` shows up in other users' profiles and searches.
    pub fn is_discoverable(viewer: Uuid, author: &User) -> bool {
        viewer == author.id || author.visibility != Visibility::Hidden
    }
}
