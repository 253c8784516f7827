//! Post entity - a single content item with platform, scheduling, and
//! engagement metadata.
//!
//! Invariants:
//! - `status == Scheduled` implies `scheduled_at.is_some()`
//! - engagement counters never go negative (increments saturate)
//!
//! Status is derived once at creation from the draft's `scheduled_at` and is
//! never recomputed as wall-clock time passes; "upcoming" views re-filter
//! with the current time instead.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::PostId;

/// Target network for a post (single-select).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SocialPlatform {
    Facebook,
    Instagram,
    X,
    LinkedIn,
}

impl SocialPlatform {
    /// Display label for UI layers.
    pub fn label(self) -> &'static str {
        match self {
            SocialPlatform::Facebook => "Facebook",
            SocialPlatform::Instagram => "Instagram",
            SocialPlatform::X => "X",
            SocialPlatform::LinkedIn => "LinkedIn",
        }
    }
}

/// Publication state of a post, fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Published,
    Scheduled,
}

/// One of the per-post engagement counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngagementKind {
    Likes,
    Dislikes,
    Comments,
    Shares,
}

/// A content item owned by the post store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub content: String,
    /// Attribution string, fixed at creation.
    pub author: String,
    /// Creation instant.
    pub timestamp: DateTime<Utc>,
    pub status: PostStatus,
    pub platform: SocialPlatform,
    /// Optional media reference (object URL or stored path).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Present only when `status == Scheduled`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub dislikes: u32,
    #[serde(default)]
    pub comments: u32,
    #[serde(default)]
    pub shares: u32,
}

impl Post {
    /// Create a post from a draft, deriving its status.
    ///
    /// A draft scheduled strictly after `now` becomes `Scheduled`; anything
    /// else (no schedule, or an instant not in the future) becomes
    /// `Published` with `scheduled_at` dropped so the status invariant holds.
    /// Counters start at zero.
    pub fn from_draft(
        id: PostId,
        author: impl Into<String>,
        now: DateTime<Utc>,
        draft: PostDraft,
    ) -> Self {
        let scheduled_at = draft.scheduled_at.filter(|at| *at > now);
        let status = if scheduled_at.is_some() {
            PostStatus::Scheduled
        } else {
            PostStatus::Published
        };

        Self {
            id,
            content: draft.content,
            author: author.into(),
            timestamp: now,
            status,
            platform: draft.platform,
            image: draft.image,
            scheduled_at,
            likes: 0,
            dislikes: 0,
            comments: 0,
            shares: 0,
        }
    }

    /// Merge a partial update into this post.
    ///
    /// Only `content`, `image`, and `platform` can change; identity,
    /// timestamps, status, and counters are untouched.
    pub fn apply(&mut self, patch: PostPatch) {
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(image) = patch.image {
            self.image = Some(image);
        }
        if let Some(platform) = patch.platform {
            self.platform = platform;
        }
    }

    /// Increment exactly one engagement counter by 1 (saturating).
    pub fn record_engagement(&mut self, kind: EngagementKind) {
        let counter = match kind {
            EngagementKind::Likes => &mut self.likes,
            EngagementKind::Dislikes => &mut self.dislikes,
            EngagementKind::Comments => &mut self.comments,
            EngagementKind::Shares => &mut self.shares,
        };
        *counter = counter.saturating_add(1);
    }

    /// Whether this post is scheduled for after `now`.
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.status == PostStatus::Scheduled
            && self.scheduled_at.is_some_and(|at| at > now)
    }
}

/// Caller-supplied fields for creating a post.
///
/// The post store itself never rejects a draft; callers (forms) run
/// [`PostDraft::validate`] before submitting.
#[derive(Debug, Clone, PartialEq)]
pub struct PostDraft {
    pub content: String,
    pub platform: SocialPlatform,
    pub image: Option<String>,
    pub scheduled_at: Option<DateTime<Utc>>,
}

impl PostDraft {
    pub fn new(content: impl Into<String>, platform: SocialPlatform) -> Self {
        Self {
            content: content.into(),
            platform,
            image: None,
            scheduled_at: None,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn scheduled_for(mut self, at: DateTime<Utc>) -> Self {
        self.scheduled_at = Some(at);
        self
    }

    /// Form-side validation: a draft needs a body and/or an image.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.content.trim().is_empty() && self.image.is_none() {
            return Err(DomainError::validation(
                "Post needs content or an image",
            ));
        }
        Ok(())
    }
}

/// Partial update for a post; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostPatch {
    pub content: Option<String>,
    pub image: Option<String>,
    pub platform: Option<SocialPlatform>,
}

impl PostPatch {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_platform(mut self, platform: SocialPlatform) -> Self {
        self.platform = Some(platform);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap()
    }

    fn draft() -> PostDraft {
        PostDraft::new("Hello", SocialPlatform::Facebook)
    }

    #[test]
    fn test_from_draft_defaults_to_published() {
        let post = Post::from_draft(PostId::FIRST, "You", now(), draft());
        assert_eq!(post.status, PostStatus::Published);
        assert_eq!(post.scheduled_at, None);
        assert_eq!(post.timestamp, now());
        assert_eq!(post.author, "You");
        assert_eq!(
            (post.likes, post.dislikes, post.comments, post.shares),
            (0, 0, 0, 0)
        );
    }

    #[test]
    fn test_from_draft_future_schedule_is_scheduled() {
        let at = now() + Duration::hours(2);
        let post = Post::from_draft(PostId::FIRST, "You", now(), draft().scheduled_for(at));
        assert_eq!(post.status, PostStatus::Scheduled);
        assert_eq!(post.scheduled_at, Some(at));
    }

    #[test]
    fn test_from_draft_past_schedule_publishes_and_drops_instant() {
        let at = now() - Duration::hours(2);
        let post = Post::from_draft(PostId::FIRST, "You", now(), draft().scheduled_for(at));
        assert_eq!(post.status, PostStatus::Published);
        assert_eq!(post.scheduled_at, None);
    }

    #[test]
    fn test_apply_merges_only_provided_fields() {
        let mut post = Post::from_draft(PostId::FIRST, "You", now(), draft());
        let before = post.clone();

        post.apply(PostPatch::content("Updated"));

        assert_eq!(post.content, "Updated");
        assert_eq!(post.id, before.id);
        assert_eq!(post.author, before.author);
        assert_eq!(post.timestamp, before.timestamp);
        assert_eq!(post.status, before.status);
        assert_eq!(post.platform, before.platform);
        assert_eq!(post.likes, before.likes);
    }

    #[test]
    fn test_apply_can_change_platform_and_image() {
        let mut post = Post::from_draft(PostId::FIRST, "You", now(), draft());
        post.apply(
            PostPatch::default()
                .with_image("blob:abc")
                .with_platform(SocialPlatform::LinkedIn),
        );
        assert_eq!(post.image.as_deref(), Some("blob:abc"));
        assert_eq!(post.platform, SocialPlatform::LinkedIn);
        assert_eq!(post.content, "Hello");
    }

    #[test]
    fn test_record_engagement_touches_exactly_one_counter() {
        let mut post = Post::from_draft(PostId::FIRST, "You", now(), draft());
        post.record_engagement(EngagementKind::Likes);
        assert_eq!(
            (post.likes, post.dislikes, post.comments, post.shares),
            (1, 0, 0, 0)
        );
        post.record_engagement(EngagementKind::Shares);
        assert_eq!(
            (post.likes, post.dislikes, post.comments, post.shares),
            (1, 0, 0, 1)
        );
    }

    #[test]
    fn test_record_engagement_saturates() {
        let mut post = Post::from_draft(PostId::FIRST, "You", now(), draft());
        post.likes = u32::MAX;
        post.record_engagement(EngagementKind::Likes);
        assert_eq!(post.likes, u32::MAX);
    }

    #[test]
    fn test_is_upcoming() {
        let at = now() + Duration::hours(1);
        let post = Post::from_draft(PostId::FIRST, "You", now(), draft().scheduled_for(at));
        assert!(post.is_upcoming(now()));
        assert!(!post.is_upcoming(now() + Duration::hours(2)));

        let published = Post::from_draft(PostId::new(2), "You", now(), draft());
        assert!(!published.is_upcoming(now()));
    }

    #[test]
    fn test_validate_requires_content_or_image() {
        assert!(draft().validate().is_ok());
        assert!(PostDraft::new("   ", SocialPlatform::X).validate().is_err());
        assert!(PostDraft::new("", SocialPlatform::X)
            .with_image("blob:abc")
            .validate()
            .is_ok());
    }

    #[test]
    fn test_post_serde_round_trip() {
        let at = now() + Duration::hours(3);
        let post = Post::from_draft(
            PostId::new(7),
            "Admin",
            now(),
            draft().with_image("blob:abc").scheduled_for(at),
        );
        let json = serde_json::to_string(&post).unwrap();
        let back: Post = serde_json::from_str(&json).unwrap();
        assert_eq!(back, post);
    }

    #[test]
    fn test_post_deserializes_with_missing_counters() {
        // Older snapshots may predate the engagement counters.
        let json = r#"{
            "id": 1,
            "content": "Hello",
            "author": "Admin",
            "timestamp": "2024-01-15T10:30:00Z",
            "status": "published",
            "platform": "Facebook"
        }"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.likes, 0);
        assert_eq!(post.scheduled_at, None);
    }
}
