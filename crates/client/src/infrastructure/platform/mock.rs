//! In-memory platform implementations for tests.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, TimeZone, Utc};

use crate::ports::outbound::{LogProvider, StorageProvider, TimeProvider};

/// In-memory storage; clones share the same underlying map, so a test can
/// hand the same storage to two store instances to exercise hydration.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    data: Arc<RwLock<HashMap<String, String>>>,
}

impl StorageProvider for MemoryStorage {
    fn save(&self, key: &str, value: &str) {
        self.data
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
    }

    fn load(&self, key: &str) -> Option<String> {
        self.data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn remove(&self, key: &str) {
        self.data
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

/// Settable clock; clones share the same instant.
#[derive(Clone)]
pub struct FixedTimeProvider {
    now: Arc<RwLock<DateTime<Utc>>>,
}

impl Default for FixedTimeProvider {
    fn default() -> Self {
        // Arbitrary fixed instant so test assertions are deterministic.
        let now = Utc
            .with_ymd_and_hms(2024, 1, 15, 10, 30, 0)
            .single()
            .unwrap_or_else(Utc::now);
        Self::at(now)
    }
}

impl FixedTimeProvider {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(RwLock::new(now)),
        }
    }

    /// Move the shared clock.
    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.write().unwrap_or_else(PoisonError::into_inner) = now;
    }
}

impl TimeProvider for FixedTimeProvider {
    fn now(&self) -> DateTime<Utc> {
        *self.now.read().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Log provider that drops everything.
#[derive(Clone, Default)]
pub struct NullLogProvider;

impl LogProvider for NullLogProvider {
    fn info(&self, _msg: &str) {}
    fn error(&self, _msg: &str) {}
    fn debug(&self, _msg: &str) {}
    fn warn(&self, _msg: &str) {}
}
