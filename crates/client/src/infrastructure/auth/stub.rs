//! Scriptable in-memory auth collaborator for tests and offline demos.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use postdeck_domain::UserProfile;

use crate::ports::outbound::{ApiError, AuthApiPort, Credentials, Registration, TokenPair};

/// In-memory `AuthApiPort` implementation.
///
/// `happy()` answers every call successfully with fixed tokens and a fixed
/// profile; the `failing_*` builders script individual operations to fail.
/// Call counters let tests assert which operations were reached.
pub struct StubAuthApi {
    profile: UserProfile,
    tokens: TokenPair,
    refreshed_access_token: String,
    fail_register: Option<ApiError>,
    fail_login: Option<ApiError>,
    fail_refresh: Option<ApiError>,
    fail_password_reset: Option<ApiError>,
    fail_current_user: Option<ApiError>,
    register_calls: Arc<AtomicUsize>,
    login_calls: Arc<AtomicUsize>,
    refresh_calls: Arc<AtomicUsize>,
    password_reset_calls: Arc<AtomicUsize>,
    current_user_calls: Arc<AtomicUsize>,
}

impl StubAuthApi {
    /// A collaborator that accepts any credentials.
    pub fn happy() -> Self {
        Self {
            profile: UserProfile {
                id: 1,
                username: "alice".to_string(),
                email: "alice@example.com".to_string(),
                first_name: "Alice".to_string(),
                last_name: "Ng".to_string(),
                display_name: None,
                role: None,
            },
            tokens: TokenPair {
                access_token: "fake-access-token".to_string(),
                refresh_token: "fake-refresh-token".to_string(),
            },
            refreshed_access_token: "fake-access-token-2".to_string(),
            fail_register: None,
            fail_login: None,
            fail_refresh: None,
            fail_password_reset: None,
            fail_current_user: None,
            register_calls: Arc::new(AtomicUsize::new(0)),
            login_calls: Arc::new(AtomicUsize::new(0)),
            refresh_calls: Arc::new(AtomicUsize::new(0)),
            password_reset_calls: Arc::new(AtomicUsize::new(0)),
            current_user_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_profile(mut self, profile: UserProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_refreshed_token(mut self, access_token: impl Into<String>) -> Self {
        self.refreshed_access_token = access_token.into();
        self
    }

    pub fn failing_register(mut self, error: ApiError) -> Self {
        self.fail_register = Some(error);
        self
    }

    pub fn failing_login(mut self, error: ApiError) -> Self {
        self.fail_login = Some(error);
        self
    }

    pub fn failing_refresh(mut self, error: ApiError) -> Self {
        self.fail_refresh = Some(error);
        self
    }

    pub fn failing_password_reset(mut self, error: ApiError) -> Self {
        self.fail_password_reset = Some(error);
        self
    }

    pub fn failing_current_user(mut self, error: ApiError) -> Self {
        self.fail_current_user = Some(error);
        self
    }

    pub fn register_calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.register_calls)
    }

    pub fn login_calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.login_calls)
    }

    pub fn refresh_calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.refresh_calls)
    }

    pub fn password_reset_calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.password_reset_calls)
    }

    pub fn current_user_calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.current_user_calls)
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
impl AuthApiPort for StubAuthApi {
    async fn register(&self, registration: &Registration) -> Result<UserProfile, ApiError> {
        self.register_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = &self.fail_register {
            return Err(error.clone());
        }
        let mut profile = self.profile.clone();
        profile.username = registration.username.clone();
        profile.email = registration.email.clone();
        Ok(profile)
    }

    async fn login(&self, _credentials: &Credentials) -> Result<TokenPair, ApiError> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = &self.fail_login {
            return Err(error.clone());
        }
        Ok(self.tokens.clone())
    }

    async fn refresh_token(&self, _refresh_token: &str) -> Result<String, ApiError> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = &self.fail_refresh {
            return Err(error.clone());
        }
        Ok(self.refreshed_access_token.clone())
    }

    async fn request_password_reset(&self, _email: &str) -> Result<(), ApiError> {
        self.password_reset_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = &self.fail_password_reset {
            return Err(error.clone());
        }
        Ok(())
    }

    async fn current_user(&self, _access_token: &str) -> Result<UserProfile, ApiError> {
        self.current_user_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = &self.fail_current_user {
            return Err(error.clone());
        }
        Ok(self.profile.clone())
    }
}
