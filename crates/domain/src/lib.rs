//! Postdeck domain types and invariants.
//!
//! Pure data: no I/O, no async, no clock access. Anything that needs the
//! current time takes it as a parameter so the application layer can inject
//! its `TimeProvider`.

pub mod common;
pub mod entities;
pub mod error;
pub mod ids;

pub use entities::{
    EngagementKind, Post, PostDraft, PostPatch, PostStatus, Role, SocialPlatform, UserProfile,
};
pub use error::DomainError;
pub use ids::PostId;
