//! HTTP auth adapter for browser targets (gloo-net).

use async_trait::async_trait;
use gloo_net::http::{Request, Response};

use postdeck_domain::UserProfile;

use super::wire::{PasswordResetRequest, RefreshRequest, WireAccessToken, WireTokenPair};
use super::DEFAULT_API_BASE_URL;
use crate::ports::outbound::{ApiError, AuthApiPort, Credentials, Registration, TokenPair};

/// gloo-net-backed client for the authentication backend.
///
/// Same contract as the desktop adapter; requests go through `fetch`, so
/// the base URL is usually same-origin relative (`/api`).
#[derive(Clone)]
pub struct HttpAuthApi {
    base_url: String,
}

impl HttpAuthApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
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
        .unwrap_or_else(|_| response.status_text());

    match status {
        401 | 403 => ApiError::Unauthorized(message),
        400 | 422 => ApiError::Validation(message),
        _ => ApiError::Http { status, message },
    }
}

async fn post_json<B: serde::Serialize>(url: &str, body: &B) -> Result<Response, ApiError> {
    Request::post(url)
        .json(body)
        .map_err(|e| ApiError::Parse(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))
}

#[async_trait(?Send)]
impl AuthApiPort for HttpAuthApi {
    async fn register(&self, registration: &Registration) -> Result<UserProfile, ApiError> {
        let response = post_json(&self.url("/auth/register/"), registration).await?;
        if !response.ok() {
            return Err(error_for(response).await);
        }
        response
            .json::<UserProfile>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    async fn login(&self, credentials: &Credentials) -> Result<TokenPair, ApiError> {
        let response = post_json(&self.url("/auth/login/"), credentials).await?;
        if !response.ok() {
            return Err(error_for(response).await);
        }
        response
            .json::<WireTokenPair>()
            .await
            .map(TokenPair::from)
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    async fn refresh_token(&self, refresh_token: &str) -> Result<String, ApiError> {
        let response = post_json(
            &self.url("/auth/token/refresh/"),
            &RefreshRequest {
                refresh: refresh_token,
            },
        )
        .await?;
        if !response.ok() {
            return Err(error_for(response).await);
        }
        response
            .json::<WireAccessToken>()
            .await
            .map(|t| t.access)
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    async fn request_password_reset(&self, email: &str) -> Result<(), ApiError> {
        let response = post_json(&self.url("/auth/password/reset/"), &PasswordResetRequest {
            email,
        })
        .await?;
        if !response.ok() {
            return Err(error_for(response).await);
        }
        Ok(())
    }

    async fn current_user(&self, access_token: &str) -> Result<UserProfile, ApiError> {
        let response = Request::get(&self.url("/auth/me/"))
            .header("Authorization", &format!("Bearer {access_token}"))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        if !response.ok() {
            return Err(error_for(response).await);
        }
        response
            .json::<UserProfile>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}
