//! Platform abstraction ports for cross-platform compatibility
//!
//! These traits abstract platform-specific operations so that:
//! 1. Store/application code remains platform-agnostic
//! 2. Platform-specific code is isolated in infrastructure
//! 3. Code becomes easily testable with mock implementations
//!
//! NOTE: The `Platform` struct (DI container) that aggregates these traits
//! lives in `state/platform.rs`, not here. The ports layer contains only
//! trait definitions.

use chrono::{DateTime, Utc};

/// Time operations abstraction
pub trait TimeProvider: Clone + 'static {
    /// Get the current instant in UTC
    fn now(&self) -> DateTime<Utc>;

    /// Get current time as Unix timestamp in seconds
    fn now_unix_secs(&self) -> u64 {
        self.now().timestamp().max(0) as u64
    }
}

/// Persistent storage abstraction (localStorage/file-based)
pub trait StorageProvider: Clone + 'static {
    /// Save a string value with the given key
    fn save(&self, key: &str, value: &str);

    /// Load a string value by key, returns None if not found
    fn load(&self, key: &str) -> Option<String>;

    /// Remove a value by key
    fn remove(&self, key: &str);
}

/// Logging abstraction for layers that cannot depend on `tracing` directly
pub trait LogProvider: Clone + 'static {
    fn info(&self, msg: &str);
    fn error(&self, msg: &str);
    fn debug(&self, msg: &str);
    fn warn(&self, msg: &str);
}

/// Storage key constants
///
/// These are kept in the ports layer as they define the contract for
/// what keys are used across the application. One entry per store.
pub mod storage_keys {
    /// Session snapshot: tokens, user, is_authenticated.
    pub const SESSION: &str = "postdeck_session";
    /// Post collection snapshot: full array.
    pub const POSTS: &str = "postdeck_posts";
}
