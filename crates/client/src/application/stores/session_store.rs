//! Session store - the authenticated identity and its credential tokens.
//!
//! Lifecycle: `Unauthenticated -> (login success) -> Authenticated ->
//! (logout | refresh failure) -> Unauthenticated`. Token rotation via
//! `refresh_access_token` does not change the state machine.
//!
//! Failure contract: every failing operation records a user-presentable
//! message in `SessionState::error` AND returns the error to the caller.
//! The one exception is the profile fetch chained into a successful login,
//! which records its message but does not fail the login (the tokens are
//! already stored and valid).

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use futures_channel::mpsc;
use serde::{Deserialize, Serialize};

use postdeck_domain::{Role, UserProfile};

use crate::application::error::SessionError;
use crate::ports::outbound::{
    storage_keys, AuthApiPort, Credentials, Registration, StorageProvider,
};

/// Role assigned to profiles the backend returns without one.
const DEFAULT_ROLE: Role = Role::Manager;

/// Observable session state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub user: Option<UserProfile>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    /// True while a network-bound operation is in flight.
    pub loading: bool,
    /// Message from the most recent failure, cleared when a new
    /// network-bound operation starts.
    pub error: Option<String>,
    pub is_authenticated: bool,
}

/// Persisted slice of the session state. `loading` and `error` are
/// transient and never written to storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SessionSnapshot {
    access_token: Option<String>,
    refresh_token: Option<String>,
    user: Option<UserProfile>,
    is_authenticated: bool,
}

impl From<&SessionState> for SessionSnapshot {
    fn from(state: &SessionState) -> Self {
        Self {
            access_token: state.access_token.clone(),
            refresh_token: state.refresh_token.clone(),
            user: state.user.clone(),
            is_authenticated: state.is_authenticated,
        }
    }
}

/// Change notifications delivered to subscribed views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// A login (or register-then-login) completed
    SignedIn,
    /// The session was destroyed, by logout or refresh recovery
    SignedOut,
    /// Any other state change (loading flags, token rotation, profile load)
    Updated,
}

/// State container for authentication.
///
/// Constructed once at application start with the auth collaborator and a
/// storage provider; rehydrates its persisted snapshot on construction.
pub struct SessionStore<S: StorageProvider> {
    api: Arc<dyn AuthApiPort>,
    storage: S,
    state: RwLock<SessionState>,
    subscribers: Mutex<Vec<mpsc::UnboundedSender<SessionEvent>>>,
}

impl<S: StorageProvider> SessionStore<S> {
    /// Create a store, rehydrating any persisted session from storage.
    pub fn new(api: Arc<dyn AuthApiPort>, storage: S) -> Self {
        let state = match storage.load(storage_keys::SESSION) {
            Some(raw) => match serde_json::from_str::<SessionSnapshot>(&raw) {
                Ok(snapshot) => SessionState {
                    user: snapshot.user,
                    access_token: snapshot.access_token,
                    refresh_token: snapshot.refresh_token,
                    loading: false,
                    error: None,
                    is_authenticated: snapshot.is_authenticated,
                },
                Err(e) => {
                    tracing::warn!("Discarding malformed session snapshot: {e}");
                    SessionState::default()
                }
            },
            None => SessionState::default(),
        };

        Self {
            api,
            storage,
            state: RwLock::new(state),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SessionState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// True iff a valid session was established.
    pub fn is_authenticated(&self) -> bool {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_authenticated
    }

    /// Subscribe to change notifications. The receiver ends when the store
    /// is dropped; closed receivers are pruned on the next notification.
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<SessionEvent> {
        let (tx, rx) = mpsc::unbounded();
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(tx);
        rx
    }

    /// Exchange credentials for tokens and load the user profile.
    ///
    /// On success the store is `Authenticated` even if the chained profile
    /// fetch fails (its message is recorded). On failure the error is
    /// recorded and returned; `is_authenticated` stays false.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), SessionError> {
        self.update(|s| {
            s.loading = true;
            s.error = None;
        });
        self.notify(SessionEvent::Updated);

        let result = self.api.login(&Credentials::new(username, password)).await;
        match result {
            Ok(tokens) => {
                self.update(|s| {
                    s.access_token = Some(tokens.access_token.clone());
                    s.refresh_token = Some(tokens.refresh_token.clone());
                    s.is_authenticated = true;
                });

                if let Err(e) = self.load_user().await {
                    tracing::warn!("Signed in but profile load failed: {e}");
                }

                self.update(|s| s.loading = false);
                self.notify(SessionEvent::SignedIn);
                tracing::debug!("Session established for {username}");
                Ok(())
            }
            Err(e) => {
                let err = SessionError::Login(e);
                self.record_failure(&err);
                Err(err)
            }
        }
    }

    /// Create an account, then auto-chain into `login`.
    pub async fn register(&self, registration: Registration) -> Result<(), SessionError> {
        self.update(|s| {
            s.loading = true;
            s.error = None;
        });
        self.notify(SessionEvent::Updated);

        match self.api.register(&registration).await {
            Ok(_profile) => {
                self.login(&registration.username, &registration.password)
                    .await
            }
            Err(e) => {
                let err = SessionError::Registration(e);
                self.record_failure(&err);
                Err(err)
            }
        }
    }

    /// Destroy the session: identity, tokens, and error are all reset.
    /// Always succeeds; no network call.
    pub fn logout(&self) {
        self.update(|s| {
            *s = SessionState::default();
        });
        self.notify(SessionEvent::SignedOut);
        tracing::debug!("Session cleared");
    }

    /// Rotate the access token using the stored refresh token.
    ///
    /// No-op when there is no refresh token. A failed exchange forces a
    /// logout as recovery, then records and returns the error.
    pub async fn refresh_access_token(&self) -> Result<(), SessionError> {
        let Some(refresh_token) = self.state().refresh_token else {
            return Ok(());
        };

        match self.api.refresh_token(&refresh_token).await {
            Ok(access_token) => {
                self.update(|s| s.access_token = Some(access_token));
                self.notify(SessionEvent::Updated);
                tracing::debug!("Access token rotated");
                Ok(())
            }
            Err(e) => {
                let err = SessionError::Refresh(e);
                tracing::warn!("{err}; forcing logout");
                self.logout();
                self.update(|s| s.error = Some(err.to_string()));
                Err(err)
            }
        }
    }

    /// Fetch and store the profile for the current access token.
    /// No-op when unauthenticated.
    pub async fn load_user(&self) -> Result<(), SessionError> {
        let Some(access_token) = self.state().access_token else {
            return Ok(());
        };

        match self.api.current_user(&access_token).await {
            Ok(profile) => {
                let profile = profile.with_presentation_defaults(DEFAULT_ROLE);
                self.update(|s| s.user = Some(profile));
                self.notify(SessionEvent::Updated);
                Ok(())
            }
            Err(e) => {
                let err = SessionError::LoadUser(e);
                self.update(|s| s.error = Some(err.to_string()));
                self.notify(SessionEvent::Updated);
                Err(err)
            }
        }
    }

    /// Ask the backend to send a password-reset email. Pure pass-through;
    /// no session state changes.
    pub async fn request_password_reset(&self, email: &str) -> Result<(), SessionError> {
        self.api
            .request_password_reset(email)
            .await
            .map_err(SessionError::PasswordReset)
    }

    /// Apply a mutation and rewrite the persisted snapshot.
    fn update(&self, f: impl FnOnce(&mut SessionState)) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut state);
        self.persist(&state);
    }

    /// Fire-and-forget snapshot write; failures are logged, never raised.
    fn persist(&self, state: &SessionState) {
        match serde_json::to_string(&SessionSnapshot::from(state)) {
            Ok(raw) => self.storage.save(storage_keys::SESSION, &raw),
            Err(e) => tracing::error!("Failed to serialize session snapshot: {e}"),
        }
    }

    fn record_failure(&self, err: &SessionError) {
        self.update(|s| {
            s.loading = false;
            s.error = Some(err.to_string());
        });
        self.notify(SessionEvent::Updated);
    }

    fn notify(&self, event: SessionEvent) {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|tx| tx.unbounded_send(event).is_ok());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::auth::StubAuthApi;
    use crate::infrastructure::platform::mock::MemoryStorage;
    use crate::ports::outbound::ApiError;

    fn store_with(api: StubAuthApi, storage: MemoryStorage) -> SessionStore<MemoryStorage> {
        SessionStore::new(Arc::new(api), storage)
    }

    #[tokio::test]
    async fn test_login_success_stores_tokens_and_user() {
        let store = store_with(StubAuthApi::happy(), MemoryStorage::default());

        store.login("alice", "secret").await.unwrap();

        let state = store.state();
        assert!(state.is_authenticated);
        assert_eq!(state.access_token.as_deref(), Some("fake-access-token"));
        assert_eq!(state.refresh_token.as_deref(), Some("fake-refresh-token"));
        assert!(!state.loading);
        assert_eq!(state.error, None);

        let user = state.user.expect("profile loaded after login");
        assert_eq!(user.username, "alice");
        assert_eq!(user.display_name.as_deref(), Some("Alice Ng"));
        assert_eq!(user.role, Some(Role::Manager));
    }

    #[tokio::test]
    async fn test_login_failure_records_error_and_propagates() {
        let api = StubAuthApi::happy()
            .failing_login(ApiError::Unauthorized("bad credentials".to_string()));
        let store = store_with(api, MemoryStorage::default());

        let err = store.login("alice", "wrong-password").await.unwrap_err();

        assert!(matches!(err, SessionError::Login(_)));
        let state = store.state();
        assert!(!state.is_authenticated);
        assert!(!state.loading);
        let message = state.error.expect("error recorded");
        assert!(!message.is_empty());
        assert!(message.starts_with("Login failed"));
    }

    #[tokio::test]
    async fn test_login_survives_profile_load_failure() {
        let api =
            StubAuthApi::happy().failing_current_user(ApiError::Network("timeout".to_string()));
        let store = store_with(api, MemoryStorage::default());

        store.login("alice", "secret").await.unwrap();

        let state = store.state();
        assert!(state.is_authenticated);
        assert_eq!(state.user, None);
        assert!(state.error.is_some());
    }

    #[tokio::test]
    async fn test_register_chains_into_login() {
        let api = StubAuthApi::happy();
        let login_calls = api.login_calls();
        let store = store_with(api, MemoryStorage::default());

        store
            .register(Registration {
                username: "alice".to_string(),
                email: "alice@example.com".to_string(),
                password: "secret".to_string(),
                password_confirm: "secret".to_string(),
                first_name: "Alice".to_string(),
                last_name: "Ng".to_string(),
            })
            .await
            .unwrap();

        assert!(store.is_authenticated());
        assert_eq!(login_calls.load(std::sync::atomic::Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_register_failure_records_error_and_propagates() {
        let api = StubAuthApi::happy()
            .failing_register(ApiError::Validation("username taken".to_string()));
        let store = store_with(api, MemoryStorage::default());

        let err = store
            .register(Registration {
                username: "alice".to_string(),
                email: "alice@example.com".to_string(),
                password: "secret".to_string(),
                password_confirm: "secret".to_string(),
                first_name: String::new(),
                last_name: String::new(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, SessionError::Registration(_)));
        assert!(!store.is_authenticated());
        assert!(store.state().error.is_some());
    }

    #[tokio::test]
    async fn test_logout_clears_everything() {
        let store = store_with(StubAuthApi::happy(), MemoryStorage::default());
        store.login("alice", "secret").await.unwrap();

        store.logout();

        let state = store.state();
        assert!(!state.is_authenticated);
        assert_eq!(state.user, None);
        assert_eq!(state.access_token, None);
        assert_eq!(state.refresh_token, None);
    }

    #[tokio::test]
    async fn test_refresh_without_token_is_noop() {
        let api = StubAuthApi::happy();
        let refresh_calls = api.refresh_calls();
        let store = store_with(api, MemoryStorage::default());

        store.refresh_access_token().await.unwrap();

        assert_eq!(refresh_calls.load(std::sync::atomic::Ordering::SeqCst), 0);
        assert!(!store.is_authenticated());
    }

    #[tokio::test]
    async fn test_refresh_rotates_only_access_token() {
        let store = store_with(
            StubAuthApi::happy().with_refreshed_token("rotated-access-token"),
            MemoryStorage::default(),
        );
        store.login("alice", "secret").await.unwrap();

        store.refresh_access_token().await.unwrap();

        let state = store.state();
        assert!(state.is_authenticated);
        assert_eq!(state.access_token.as_deref(), Some("rotated-access-token"));
        assert_eq!(state.refresh_token.as_deref(), Some("fake-refresh-token"));
    }

    #[tokio::test]
    async fn test_refresh_failure_forces_logout() {
        let store = store_with(
            StubAuthApi::happy()
                .failing_refresh(ApiError::Unauthorized("refresh expired".to_string())),
            MemoryStorage::default(),
        );
        store.login("alice", "secret").await.unwrap();

        let err = store.refresh_access_token().await.unwrap_err();

        assert!(err.is_unauthorized());
        let state = store.state();
        assert!(!state.is_authenticated);
        assert_eq!(state.access_token, None);
        assert_eq!(state.refresh_token, None);
        assert!(state.error.expect("recorded").starts_with("Token refresh failed"));
    }

    #[tokio::test]
    async fn test_load_user_without_token_is_noop() {
        let api = StubAuthApi::happy();
        let current_user_calls = api.current_user_calls();
        let store = store_with(api, MemoryStorage::default());

        store.load_user().await.unwrap();

        assert_eq!(
            current_user_calls.load(std::sync::atomic::Ordering::SeqCst),
            0
        );
    }

    #[tokio::test]
    async fn test_snapshot_hydration_between_instances() {
        let storage = MemoryStorage::default();
        {
            let store = store_with(StubAuthApi::happy(), storage.clone());
            store.login("alice", "secret").await.unwrap();
        }

        let rehydrated = store_with(StubAuthApi::happy(), storage);
        let state = rehydrated.state();
        assert!(state.is_authenticated);
        assert_eq!(state.access_token.as_deref(), Some("fake-access-token"));
        assert_eq!(state.user.expect("user persisted").username, "alice");
        // Transient fields are not persisted.
        assert!(!state.loading);
        assert_eq!(state.error, None);
    }

    #[tokio::test]
    async fn test_malformed_snapshot_is_discarded() {
        let storage = MemoryStorage::default();
        storage.save(storage_keys::SESSION, "{not json");

        let store = store_with(StubAuthApi::happy(), storage);
        assert_eq!(store.state(), SessionState::default());
    }

    #[tokio::test]
    async fn test_subscribers_see_sign_in_and_out() {
        let store = store_with(StubAuthApi::happy(), MemoryStorage::default());
        let mut events = store.subscribe();

        store.login("alice", "secret").await.unwrap();
        store.logout();

        let mut seen = Vec::new();
        while let Ok(Some(event)) = events.try_next() {
            seen.push(event);
        }
        assert!(seen.contains(&SessionEvent::SignedIn));
        assert_eq!(seen.last(), Some(&SessionEvent::SignedOut));
    }
}
