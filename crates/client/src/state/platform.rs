//! Platform DI Container
//!
//! `Platform` aggregates the platform-specific service implementations
//! behind dyn-safe wrapper traits so the composition root can pass one
//! cloneable handle into whatever UI context mechanism the host uses.
//!
//! Created by the `create_platform()` factory in
//! `infrastructure/platform/{desktop,wasm}.rs`; the `*_adapter()` methods
//! hand out `Clone + 'static` views that satisfy the store constructors'
//! port bounds.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::ports::outbound::{LogProvider, StorageProvider, TimeProvider};

/// Unified platform services container
#[derive(Clone)]
pub struct Platform {
    time: Arc<dyn TimeProviderDyn>,
    storage: Arc<dyn StorageProviderDyn>,
    log: Arc<dyn LogProviderDyn>,
}

// =============================================================================
// Dynamic trait versions for Arc storage (need Send + Sync for UI contexts)
// =============================================================================

trait TimeProviderDyn: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

trait StorageProviderDyn: Send + Sync {
    fn save(&self, key: &str, value: &str);
    fn load(&self, key: &str) -> Option<String>;
    fn remove(&self, key: &str);
}

trait LogProviderDyn: Send + Sync {
    fn info(&self, msg: &str);
    fn error(&self, msg: &str);
    fn debug(&self, msg: &str);
    fn warn(&self, msg: &str);
}

// =============================================================================
// Blanket implementations - convert port traits to dyn-safe wrappers
// =============================================================================

impl<T: TimeProvider + Send + Sync> TimeProviderDyn for T {
    fn now(&self) -> DateTime<Utc> {
        TimeProvider::now(self)
    }
}

impl<T: StorageProvider + Send + Sync> StorageProviderDyn for T {
    fn save(&self, key: &str, value: &str) {
        StorageProvider::save(self, key, value)
    }
    fn load(&self, key: &str) -> Option<String> {
        StorageProvider::load(self, key)
    }
    fn remove(&self, key: &str) {
        StorageProvider::remove(self, key)
    }
}

impl<T: LogProvider + Send + Sync> LogProviderDyn for T {
    fn info(&self, msg: &str) {
        LogProvider::info(self, msg)
    }
    fn error(&self, msg: &str) {
        LogProvider::error(self, msg)
    }
    fn debug(&self, msg: &str) {
        LogProvider::debug(self, msg)
    }
    fn warn(&self, msg: &str) {
        LogProvider::warn(self, msg)
    }
}

// =============================================================================
// Platform implementation
// =============================================================================

impl Platform {
    /// Create a new Platform with the given providers
    pub fn new<Tm, S, L>(time: Tm, storage: S, log: L) -> Self
    where
        Tm: TimeProvider + Send + Sync,
        S: StorageProvider + Send + Sync,
        L: LogProvider + Send + Sync,
    {
        Self {
            time: Arc::new(time),
            storage: Arc::new(storage),
            log: Arc::new(log),
        }
    }

    /// Get the current instant in UTC
    pub fn now(&self) -> DateTime<Utc> {
        self.time.now()
    }

    /// Save a string value with the given key
    pub fn storage_save(&self, key: &str, value: &str) {
        self.storage.save(key, value)
    }

    /// Load a string value by key, returns None if not found
    pub fn storage_load(&self, key: &str) -> Option<String> {
        self.storage.load(key)
    }

    /// Remove a value by key
    pub fn storage_remove(&self, key: &str) {
        self.storage.remove(key)
    }

    /// Get a `StorageProvider` adapter for constructing stores
    ///
    /// # Example
    /// ```ignore
    /// let posts = PostStore::new(platform.storage_adapter(), platform.time_adapter());
    /// ```
    pub fn storage_adapter(&self) -> PlatformStorageAdapter {
        PlatformStorageAdapter {
            platform: self.clone(),
        }
    }

    /// Get a `TimeProvider` adapter for constructing stores
    pub fn time_adapter(&self) -> PlatformTimeAdapter {
        PlatformTimeAdapter {
            platform: self.clone(),
        }
    }

    /// Log an info message
    pub fn log_info(&self, msg: &str) {
        self.log.info(msg)
    }

    /// Log an error message
    pub fn log_error(&self, msg: &str) {
        self.log.error(msg)
    }

    /// Log a debug message
    pub fn log_debug(&self, msg: &str) {
        self.log.debug(msg)
    }

    /// Log a warning message
    pub fn log_warn(&self, msg: &str) {
        self.log.warn(msg)
    }
}

/// `StorageProvider` view over a `Platform`
#[derive(Clone)]
pub struct PlatformStorageAdapter {
    platform: Platform,
}

impl StorageProvider for PlatformStorageAdapter {
    fn save(&self, key: &str, value: &str) {
        self.platform.storage_save(key, value)
    }

    fn load(&self, key: &str) -> Option<String> {
        self.platform.storage_load(key)
    }

    fn remove(&self, key: &str) {
        self.platform.storage_remove(key)
    }
}

/// `TimeProvider` view over a `Platform`
#[derive(Clone)]
pub struct PlatformTimeAdapter {
    platform: Platform,
}

impl TimeProvider for PlatformTimeAdapter {
    fn now(&self) -> DateTime<Utc> {
        self.platform.now()
    }
}
