//! Domain entities.

mod post;
mod user;

pub use post::{EngagementKind, Post, PostDraft, PostPatch, PostStatus, SocialPlatform};
pub use user::{Role, UserProfile};
