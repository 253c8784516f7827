//! Post store - the content collection and its engagement counters.
//!
//! Ordering: newest-added entries first; the store never reorders beyond
//! that. Mutations on unknown ids are silent no-ops (the store raises no
//! errors of its own; form-side checks live in `PostDraft::validate`).

use std::sync::{Mutex, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use futures_channel::mpsc;
use serde::{Deserialize, Serialize};

use postdeck_domain::{EngagementKind, Post, PostDraft, PostId, PostPatch};

use crate::ports::outbound::{storage_keys, StorageProvider, TimeProvider};

/// Attribution used when no author is configured.
const DEFAULT_AUTHOR: &str = "You";

/// Persisted shape: the full collection, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PostsSnapshot {
    posts: Vec<Post>,
}

/// Change notifications delivered to subscribed views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostEvent {
    Added(PostId),
    Updated(PostId),
    Deleted(PostId),
    Engagement(PostId, EngagementKind),
}

/// State container for the post collection.
pub struct PostStore<S: StorageProvider, T: TimeProvider> {
    storage: S,
    time: T,
    author: String,
    posts: RwLock<Vec<Post>>,
    subscribers: Mutex<Vec<mpsc::UnboundedSender<PostEvent>>>,
}

impl<S: StorageProvider, T: TimeProvider> PostStore<S, T> {
    /// Create a store, rehydrating any persisted collection from storage.
    pub fn new(storage: S, time: T) -> Self {
        let posts = match storage.load(storage_keys::POSTS) {
            Some(raw) => match serde_json::from_str::<PostsSnapshot>(&raw) {
                Ok(snapshot) => snapshot.posts,
                Err(e) => {
                    tracing::warn!("Discarding malformed posts snapshot: {e}");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        Self {
            storage,
            time,
            author: DEFAULT_AUTHOR.to_string(),
            posts: RwLock::new(posts),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Set the attribution stamped onto new posts (the signed-in user's
    /// display name, typically).
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Snapshot of the collection, newest first.
    pub fn posts(&self) -> Vec<Post> {
        self.posts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn get(&self, id: PostId) -> Option<Post> {
        self.posts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.posts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Scheduled posts with `scheduled_at` after `now`, soonest first.
    pub fn upcoming_scheduled(&self, now: DateTime<Utc>) -> Vec<Post> {
        let mut upcoming: Vec<Post> = self
            .posts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|p| p.is_upcoming(now))
            .cloned()
            .collect();
        upcoming.sort_by_key(|p| p.scheduled_at);
        upcoming
    }

    /// Subscribe to change notifications.
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<PostEvent> {
        let (tx, rx) = mpsc::unbounded();
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(tx);
        rx
    }

    /// Create a post from a draft and prepend it to the collection.
    ///
    /// Assigns the next id (max existing + 1, or 1 when empty), the store's
    /// author attribution, the current instant, and zeroed counters. Returns
    /// the created post.
    pub fn add_post(&self, draft: PostDraft) -> Post {
        let post = {
            let mut posts = self.posts.write().unwrap_or_else(PoisonError::into_inner);
            let id = posts
                .iter()
                .map(|p| p.id)
                .max()
                .map_or(PostId::FIRST, PostId::next);
            let post = Post::from_draft(id, self.author.clone(), self.time.now(), draft);
            posts.insert(0, post.clone());
            self.persist(&posts);
            post
        };

        tracing::debug!("Added post {} ({:?})", post.id, post.status);
        self.notify(PostEvent::Added(post.id));
        post
    }

    /// Merge the provided fields into the matching post. Unknown id: no-op.
    pub fn update_post(&self, id: PostId, patch: PostPatch) {
        let found = {
            let mut posts = self.posts.write().unwrap_or_else(PoisonError::into_inner);
            match posts.iter_mut().find(|p| p.id == id) {
                Some(post) => {
                    post.apply(patch);
                    self.persist(&posts);
                    true
                }
                None => false,
            }
        };

        if found {
            self.notify(PostEvent::Updated(id));
        } else {
            tracing::debug!("update_post: no post with id {id}");
        }
    }

    /// Remove the matching post. Unknown id: no-op. No tombstone is kept.
    pub fn delete_post(&self, id: PostId) {
        let removed = {
            let mut posts = self.posts.write().unwrap_or_else(PoisonError::into_inner);
            let before = posts.len();
            posts.retain(|p| p.id != id);
            if posts.len() != before {
                self.persist(&posts);
                true
            } else {
                false
            }
        };

        if removed {
            tracing::debug!("Deleted post {id}");
            self.notify(PostEvent::Deleted(id));
        }
    }

    /// Increment exactly one engagement counter by 1. Unknown id: no-op.
    pub fn update_engagement(&self, id: PostId, kind: EngagementKind) {
        let found = {
            let mut posts = self.posts.write().unwrap_or_else(PoisonError::into_inner);
            match posts.iter_mut().find(|p| p.id == id) {
                Some(post) => {
                    post.record_engagement(kind);
                    self.persist(&posts);
                    true
                }
                None => false,
            }
        };

        if found {
            self.notify(PostEvent::Engagement(id, kind));
        }
    }

    /// Fire-and-forget snapshot write; failures are logged, never raised.
    fn persist(&self, posts: &[Post]) {
        let snapshot = PostsSnapshot {
            posts: posts.to_vec(),
        };
        match serde_json::to_string(&snapshot) {
            Ok(raw) => self.storage.save(storage_keys::POSTS, &raw),
            Err(e) => tracing::error!("Failed to serialize posts snapshot: {e}"),
        }
    }

    fn notify(&self, event: PostEvent) {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|tx| tx.unbounded_send(event).is_ok());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::platform::mock::{FixedTimeProvider, MemoryStorage};
    use chrono::Duration;
    use postdeck_domain::{PostStatus, SocialPlatform};

    fn store() -> PostStore<MemoryStorage, FixedTimeProvider> {
        PostStore::new(MemoryStorage::default(), FixedTimeProvider::default())
    }

    fn draft(content: &str) -> PostDraft {
        PostDraft::new(content, SocialPlatform::Facebook)
    }

    #[test]
    fn test_first_post_gets_id_one() {
        let store = store();
        let post = store.add_post(draft("Hello"));

        assert_eq!(post.id, PostId::FIRST);
        assert_eq!(post.author, "You");
        assert_eq!(
            (post.likes, post.dislikes, post.comments, post.shares),
            (0, 0, 0, 0)
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_ids_are_unique_and_strictly_increasing() {
        let store = store();
        let ids: Vec<u64> = (0..5)
            .map(|i| store.add_post(draft(&format!("post {i}"))).id.value())
            .collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_id_is_one_more_than_prior_maximum() {
        // Collection [1, 3, 5] -> next id is 6.
        let store = store();
        for _ in 0..5 {
            store.add_post(draft("filler"));
        }
        store.delete_post(PostId::new(2));
        store.delete_post(PostId::new(4));

        let post = store.add_post(draft("next"));
        assert_eq!(post.id, PostId::new(6));
    }

    #[test]
    fn test_newest_posts_come_first() {
        let store = store();
        store.add_post(draft("first"));
        store.add_post(draft("second"));

        let posts = store.posts();
        assert_eq!(posts[0].content, "second");
        assert_eq!(posts[1].content, "first");
    }

    #[test]
    fn test_update_changes_only_content() {
        let store = store();
        let created = store.add_post(draft("Hello"));

        store.update_post(created.id, PostPatch::content("X"));

        let updated = store.get(created.id).expect("post exists");
        assert_eq!(updated.content, "X");
        assert_eq!(updated.author, created.author);
        assert_eq!(updated.timestamp, created.timestamp);
        assert_eq!(updated.status, created.status);
        assert_eq!(updated.likes, created.likes);
    }

    #[test]
    fn test_update_unknown_id_leaves_collection_unchanged() {
        let store = store();
        store.add_post(draft("Hello"));
        let before = store.posts();

        store.update_post(PostId::new(99), PostPatch::content("X"));

        assert_eq!(store.posts(), before);
    }

    #[test]
    fn test_delete_removes_exactly_one() {
        let store = store();
        let a = store.add_post(draft("a"));
        store.add_post(draft("b"));

        store.delete_post(a.id);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(a.id), None);

        // Unknown id: no-op
        store.delete_post(PostId::new(42));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_engagement_increments_exactly_one_counter() {
        let store = store();
        let post = store.add_post(draft("Hello"));

        store.update_engagement(post.id, EngagementKind::Likes);

        let updated = store.get(post.id).expect("post exists");
        assert_eq!(
            (
                updated.likes,
                updated.dislikes,
                updated.comments,
                updated.shares
            ),
            (1, 0, 0, 0)
        );

        // Unknown id: no-op
        store.update_engagement(PostId::new(42), EngagementKind::Shares);
        assert_eq!(store.get(post.id).expect("post exists").shares, 0);
    }

    #[test]
    fn test_scheduled_draft_creates_scheduled_post() {
        let time = FixedTimeProvider::default();
        let store = PostStore::new(MemoryStorage::default(), time.clone());

        let at = time.now() + Duration::hours(2);
        let post = store.add_post(draft("later").scheduled_for(at));

        assert_eq!(post.status, PostStatus::Scheduled);
        assert_eq!(post.scheduled_at, Some(at));
    }

    #[test]
    fn test_upcoming_scheduled_sorted_ascending() {
        let time = FixedTimeProvider::default();
        let store = PostStore::new(MemoryStorage::default(), time.clone());
        let now = time.now();

        store.add_post(draft("published"));
        let later = store.add_post(draft("later").scheduled_for(now + Duration::hours(5)));
        let sooner = store.add_post(draft("sooner").scheduled_for(now + Duration::hours(1)));

        let upcoming = store.upcoming_scheduled(now);
        assert_eq!(
            upcoming.iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![sooner.id, later.id]
        );

        // Once the clock passes an instant, that entry drops out of the view
        // (its status never changes).
        let upcoming = store.upcoming_scheduled(now + Duration::hours(2));
        assert_eq!(upcoming.iter().map(|p| p.id).collect::<Vec<_>>(), vec![later.id]);
        assert_eq!(
            store.get(sooner.id).expect("still stored").status,
            PostStatus::Scheduled
        );
    }

    #[test]
    fn test_snapshot_hydration_between_instances() {
        let storage = MemoryStorage::default();
        let time = FixedTimeProvider::default();
        {
            let store = PostStore::new(storage.clone(), time.clone());
            store.add_post(draft("persisted").with_image("blob:abc"));
            store.update_engagement(PostId::FIRST, EngagementKind::Comments);
        }

        let rehydrated = PostStore::new(storage, time);
        let posts = rehydrated.posts();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].content, "persisted");
        assert_eq!(posts[0].image.as_deref(), Some("blob:abc"));
        assert_eq!(posts[0].comments, 1);
    }

    #[test]
    fn test_malformed_snapshot_is_discarded() {
        let storage = MemoryStorage::default();
        storage.save(storage_keys::POSTS, "not json at all");

        let store = PostStore::new(storage, FixedTimeProvider::default());
        assert!(store.is_empty());
    }

    #[test]
    fn test_author_attribution() {
        let store = PostStore::new(MemoryStorage::default(), FixedTimeProvider::default())
            .with_author("Alice Ng");
        let post = store.add_post(draft("attributed"));
        assert_eq!(post.author, "Alice Ng");
    }

    #[test]
    fn test_subscribers_see_mutations() {
        let store = store();
        let mut events = store.subscribe();

        let post = store.add_post(draft("Hello"));
        store.update_engagement(post.id, EngagementKind::Likes);
        store.delete_post(post.id);

        let mut seen = Vec::new();
        while let Ok(Some(event)) = events.try_next() {
            seen.push(event);
        }
        assert_eq!(
            seen,
            vec![
                PostEvent::Added(post.id),
                PostEvent::Engagement(post.id, EngagementKind::Likes),
                PostEvent::Deleted(post.id),
            ]
        );
    }
}
