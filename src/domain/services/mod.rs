//! # Domain Services
//!
//! Rules that don't belong to a single entity.
//!
//! - **VisibilityService**: who may read whose content
//! - **MessagingPolicy**: which follow edges a direct message requires

mod messaging_policy;
mod visibility;

pub use messaging_policy::*;
pub use visibility::*;
