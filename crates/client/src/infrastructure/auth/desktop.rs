//! HTTP auth adapter for desktop targets (reqwest).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};

use postdeck_domain::UserProfile;

use super::wire::{PasswordResetRequest, RefreshRequest, WireAccessToken, WireTokenPair};
use super::{API_URL_ENV, DEFAULT_API_BASE_URL};
use crate::ports::outbound::{ApiError, AuthApiPort, Credentials, Registration, TokenPair};

/// Request timeout; auth calls are small and should fail fast.
const REQUEST_TIMEOUT_SECS: u64 = 15;

/// reqwest-backed client for the authentication backend.
#[derive(Clone)]
pub struct HttpAuthApi {
    client: Client,
    base_url: String,
}

impl HttpAuthApi {
    pub fn new(base_url: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create a client from `POSTDECK_API_URL`, falling back to the default.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
        Self::new(&base_url)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Default for HttpAuthApi {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

/// Map a non-success response to the port error taxonomy.
async fn error_for(response: Response) -> ApiError {
    let status = response.status();
    let message = response
        .text()
        .await
        .unwrap_or_else(|_| status.to_string());

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Unauthorized(message),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            ApiError::Validation(message)
        }
        _ => ApiError::Http {
            status: status.as_u16(),
            message,
        },
    }
}

#[async_trait]
impl AuthApiPort for HttpAuthApi {
    async fn register(&self, registration: &Registration) -> Result<UserProfile, ApiError> {
        let response = self
            .client
            .post(self.url("/auth/register/"))
            .json(registration)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(error_for(response).await);
        }

        response
            .json::<UserProfile>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    async fn login(&self, credentials: &Credentials) -> Result<TokenPair, ApiError> {
        let response = self
            .client
            .post(self.url("/auth/login/"))
            .json(credentials)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(error_for(response).await);
        }

        response
            .json::<WireTokenPair>()
            .await
            .map(TokenPair::from)
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    async fn refresh_token(&self, refresh_token: &str) -> Result<String, ApiError> {
        let response = self
            .client
            .post(self.url("/auth/token/refresh/"))
            .json(&RefreshRequest {
                refresh: refresh_token,
            })
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(error_for(response).await);
        }

        response
            .json::<WireAccessToken>()
            .await
            .map(|t| t.access)
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    async fn request_password_reset(&self, email: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.url("/auth/password/reset/"))
            .json(&PasswordResetRequest { email })
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(error_for(response).await);
        }
        Ok(())
    }

    async fn current_user(&self, access_token: &str) -> Result<UserProfile, ApiError> {
        let response = self
            .client
            .get(self.url("/auth/me/"))
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(error_for(response).await);
        }

        response
            .json::<UserProfile>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}
