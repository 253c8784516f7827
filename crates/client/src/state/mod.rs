//! State containers for client-side dependency injection
//!
//! This module contains the DI container that aggregates platform
//! adapters. It is a concrete implementation and belongs with the
//! adapters, not the ports layer.

mod platform;

pub use platform::{Platform, PlatformStorageAdapter, PlatformTimeAdapter};
