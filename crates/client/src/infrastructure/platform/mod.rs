//! Platform-specific implementations
//!
//! This module provides platform-specific implementations of the platform
//! abstraction traits defined in `ports/outbound/platform.rs`.
//!
//! The correct platform is selected at compile time based on the target
//! architecture.

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(not(target_arch = "wasm32"))]
mod desktop;

pub mod mock;

#[cfg(target_arch = "wasm32")]
pub use wasm::{create_platform, WasmLogProvider, WasmStorageProvider, WasmTimeProvider};

#[cfg(not(target_arch = "wasm32"))]
pub use desktop::{
    create_platform, DesktopLogProvider, DesktopStorageProvider, DesktopTimeProvider,
};
