//! WASM platform implementations
//!
//! Provides platform-specific implementations for the browser using
//! web-sys bindings: localStorage for persistence, `js_sys::Date` for the
//! clock, and the console for the log port.

use chrono::{DateTime, TimeZone, Utc};

use crate::ports::outbound::{LogProvider, StorageProvider, TimeProvider};
use crate::state::Platform;

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

/// Browser time provider using `js_sys::Date`
#[derive(Clone, Default)]
pub struct WasmTimeProvider;

impl TimeProvider for WasmTimeProvider {
    fn now(&self) -> DateTime<Utc> {
        let millis = js_sys::Date::now() as i64;
        match Utc.timestamp_millis_opt(millis) {
            chrono::LocalResult::Single(dt) => dt,
            // Date::now() outside chrono's range cannot happen in practice
            _ => Utc::now(),
        }
    }
}

/// Browser storage provider backed by localStorage
///
/// All failures (storage disabled, quota exceeded) are logged and treated
/// as missing values, matching the fire-and-forget persistence contract.
#[derive(Clone, Default)]
pub struct WasmStorageProvider;

impl StorageProvider for WasmStorageProvider {
    fn save(&self, key: &str, value: &str) {
        match local_storage() {
            Some(storage) => {
                if storage.set_item(key, value).is_err() {
                    tracing::error!("localStorage write failed for key {key}");
                }
            }
            None => tracing::error!("localStorage unavailable"),
        }
    }

    fn load(&self, key: &str) -> Option<String> {
        local_storage().and_then(|storage| storage.get_item(key).ok().flatten())
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// Browser log provider forwarding to the console via tracing-wasm
#[derive(Clone, Default)]
pub struct WasmLogProvider;

impl LogProvider for WasmLogProvider {
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

/// Create the platform container for browser targets.
pub fn create_platform() -> Platform {
    Platform::new(WasmTimeProvider, WasmStorageProvider, WasmLogProvider)
}
