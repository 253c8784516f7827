//! Auth backend adapters implementing `AuthApiPort`.
//!
//! Desktop uses reqwest; the browser build uses gloo-net (its futures are
//! not `Send`, which is why the port is `?Send` on wasm). `StubAuthApi` is
//! a scriptable in-memory implementation for tests and offline demos.

mod stub;
mod wire;

#[cfg(not(target_arch = "wasm32"))]
mod desktop;

#[cfg(target_arch = "wasm32")]
mod wasm;

pub use stub::StubAuthApi;

#[cfg(not(target_arch = "wasm32"))]
pub use desktop::HttpAuthApi;

#[cfg(target_arch = "wasm32")]
pub use wasm::HttpAuthApi;

/// Env var consulted by `HttpAuthApi::from_env` on desktop.
pub const API_URL_ENV: &str = "POSTDECK_API_URL";

/// Default API base URL: local backend on desktop, relative path in the
/// browser (same origin).
#[cfg(not(target_arch = "wasm32"))]
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
#[cfg(target_arch = "wasm32")]
pub const DEFAULT_API_BASE_URL: &str = "/api";
