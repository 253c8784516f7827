//! Desktop platform implementations
//!
//! Provides platform-specific implementations for desktop using the
//! standard library and native crates.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use directories::ProjectDirs;

use crate::ports::outbound::{LogProvider, StorageProvider, TimeProvider};
use crate::state::Platform;

/// Desktop time provider using the system clock
#[derive(Clone, Default)]
pub struct DesktopTimeProvider;

impl TimeProvider for DesktopTimeProvider {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Desktop storage provider with file-based persistence
///
/// Stores key-value pairs in a JSON file at:
/// - Linux: ~/.config/postdeck/client/storage.json
/// - macOS: ~/Library/Application Support/io.postdeck.client/storage.json
/// - Windows: C:\Users\<User>\AppData\Roaming\postdeck\client\storage.json
#[derive(Clone)]
pub struct DesktopStorageProvider {
    /// Path to the storage file
    storage_path: PathBuf,
    /// In-memory cache of stored values
    cache: Arc<RwLock<HashMap<String, String>>>,
}

impl Default for DesktopStorageProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DesktopStorageProvider {
    /// Create a new desktop storage provider
    ///
    /// Loads existing data from the storage file if it exists.
    pub fn new() -> Self {
        let storage_path = if let Some(dirs) = ProjectDirs::from("io", "postdeck", "client") {
            dirs.config_dir().join("storage.json")
        } else {
            // Fallback to current directory if project dirs unavailable
            PathBuf::from("postdeck_storage.json")
        };

        Self::at_path(storage_path)
    }

    /// Create a provider backed by an explicit file (used by tests and the
    /// demo binary's `--storage` override).
    pub fn at_path(storage_path: PathBuf) -> Self {
        let cache = if storage_path.exists() {
            match fs::read_to_string(&storage_path) {
                Ok(data) => match serde_json::from_str::<HashMap<String, String>>(&data) {
                    Ok(map) => map,
                    Err(e) => {
                        tracing::warn!("Failed to parse storage file: {}", e);
                        HashMap::new()
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read storage file: {}", e);
                    HashMap::new()
                }
            }
        } else {
            HashMap::new()
        };

        tracing::debug!("Desktop storage initialized at: {:?}", storage_path);

        Self {
            storage_path,
            cache: Arc::new(RwLock::new(cache)),
        }
    }

    /// Persist the cache to disk
    fn persist(&self) {
        if let Some(parent) = self.storage_path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                tracing::error!("Failed to create storage directory: {}", e);
                return;
            }
        }

        let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
        match serde_json::to_string_pretty(&*cache) {
            Ok(data) => {
                if let Err(e) = fs::write(&self.storage_path, data) {
                    tracing::error!("Failed to write storage file: {}", e);
                }
            }
            Err(e) => {
                tracing::error!("Failed to serialize storage data: {}", e);
            }
        }
    }
}

impl StorageProvider for DesktopStorageProvider {
    fn save(&self, key: &str, value: &str) {
        {
            let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
            cache.insert(key.to_string(), value.to_string());
        }
        self.persist();
    }

    fn load(&self, key: &str) -> Option<String> {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn remove(&self, key: &str) {
        {
            let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
            cache.remove(key);
        }
        self.persist();
    }
}

/// Desktop log provider using tracing
#[derive(Clone, Default)]
pub struct DesktopLogProvider;

impl LogProvider for DesktopLogProvider {
    fn info(&self, msg: &str) {
        tracing::info!("{}", msg);
    }

    fn error(&self, msg: &str) {
        tracing::error!("{}", msg);
    }

    fn debug(&self, msg: &str) {
        tracing::debug!("{}", msg);
    }

    fn warn(&self, msg: &str) {
        tracing::warn!("{}", msg);
    }
}

/// Create the platform container for desktop targets.
pub fn create_platform() -> Platform {
    Platform::new(
        DesktopTimeProvider,
        DesktopStorageProvider::new(),
        DesktopLogProvider,
    )
}
