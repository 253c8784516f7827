//! Auth API Port - Object-safe boundary to the authentication backend
//!
//! The session store only ever talks to the backend through this trait, so
//! it can be driven by an HTTP adapter in production and a scriptable stub
//! in tests. The trait is object-safe on purpose: the composition root
//! stores it behind `Arc<dyn AuthApiPort>`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use postdeck_domain::UserProfile;

/// Errors raised by the authentication backend boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Transport failure: request never completed
    #[error("Network error: {0}")]
    Network(String),

    /// Backend answered with a non-success status
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Credentials or token rejected
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Backend rejected the submitted fields
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Response body could not be decoded
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl ApiError {
    /// Check if this is an authorization error
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            ApiError::Unauthorized(_) | ApiError::Http { status: 401, .. }
        )
    }
}

/// Login form fields.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Registration form fields. Password confirmation is checked by the form
/// before this ever reaches the wire; the backend checks it again.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    pub first_name: String,
    pub last_name: String,
}

/// Token pair returned by a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Contract with the external authentication collaborator.
///
/// Futures are `?Send` on wasm (single-threaded executor, `gloo-net`
/// futures are not `Send`).
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
pub trait AuthApiPort: Send + Sync {
    /// Create an account; returns the created profile.
    async fn register(&self, registration: &Registration) -> Result<UserProfile, ApiError>;

    /// Exchange credentials for a token pair.
    async fn login(&self, credentials: &Credentials) -> Result<TokenPair, ApiError>;

    /// Exchange a refresh token for a new access token.
    async fn refresh_token(&self, refresh_token: &str) -> Result<String, ApiError>;

    /// Ask the backend to send a password-reset email.
    async fn request_password_reset(&self, email: &str) -> Result<(), ApiError>;

    /// Fetch the profile the access token belongs to.
    async fn current_user(&self, access_token: &str) -> Result<UserProfile, ApiError>;
}
