//! Store layer error types
//!
//! Session operations both record a user-presentable message on the store
//! (`SessionState::error`) and return one of these to the caller. The
//! message prefixes match what the UI shows in its notifications.

use thiserror::Error;

use crate::ports::outbound::ApiError;

/// Errors returned by session store operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Login failed: {0}")]
    Login(#[source] ApiError),

    #[error("Registration failed: {0}")]
    Registration(#[source] ApiError),

    #[error("Token refresh failed: {0}")]
    Refresh(#[source] ApiError),

    #[error("Failed to load user: {0}")]
    LoadUser(#[source] ApiError),

    #[error("Password reset failed: {0}")]
    PasswordReset(#[source] ApiError),
}

impl SessionError {
    /// The underlying backend error.
    pub fn api_error(&self) -> &ApiError {
        match self {
            SessionError::Login(e)
            | SessionError::Registration(e)
            | SessionError::Refresh(e)
            | SessionError::LoadUser(e)
            | SessionError::PasswordReset(e) => e,
        }
    }

    /// Check if the backend rejected our credentials or token
    pub fn is_unauthorized(&self) -> bool {
        self.api_error().is_unauthorized()
    }
}
