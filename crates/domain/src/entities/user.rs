//! User profile entity for the authenticated identity.

use serde::{Deserialize, Serialize};

/// Role of the signed-in user within the workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    Member,
}

/// Identity record for the signed-in user.
///
/// `display_name` is composed from the name fields when the profile is
/// loaded; `username` is the fallback when both name fields are empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: u64,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

impl UserProfile {
    /// Compose "First Last" from the name fields, falling back to the
    /// username when both are empty.
    pub fn composed_display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }

    /// Fill in `display_name` (and a default role) for presentation.
    pub fn with_presentation_defaults(mut self, default_role: Role) -> Self {
        self.display_name = Some(self.composed_display_name());
        if self.role.is_none() {
            self.role = Some(default_role);
        }
        self
    }
}
