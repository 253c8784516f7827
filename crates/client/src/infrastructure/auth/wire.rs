//! Wire DTOs for the auth backend.
//!
//! The backend's token fields are named `access`/`refresh`; these types
//! keep that contract at the adapter boundary and translate to the port
//! DTOs (`TokenPair`) that the rest of the client uses.

use serde::{Deserialize, Serialize};

use crate::ports::outbound::TokenPair;

#[derive(Debug, Clone, Deserialize)]
pub(super) struct WireTokenPair {
    pub access: String,
    pub refresh: String,
}

impl From<WireTokenPair> for TokenPair {
    fn from(wire: WireTokenPair) -> Self {
        Self {
            access_token: wire.access,
            refresh_token: wire.refresh,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct WireAccessToken {
    pub access: String,
}

#[derive(Debug, Clone, Serialize)]
pub(super) struct RefreshRequest<'a> {
    pub refresh: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub(super) struct PasswordResetRequest<'a> {
    pub email: &'a str,
}
