//! User record as issued by the auth provider.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::UserId;

/// Identity record owned by the auth provider.
///
/// The reflector stores and republishes this value without looking inside it;
/// the fields exist so UI code and adapters can deserialize and read it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// The unique user identifier from the auth provider.
    pub id: UserId,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub phone: Option<String>,

    /// Provider role claim (e.g. `authenticated`).
    #[serde(default)]
    pub role: Option<String>,

    /// Provider-controlled metadata (provider, roles...).
    #[serde(default)]
    pub app_metadata: serde_json::Value,

    /// User-editable metadata (display name, avatar...).
    #[serde(default)]
    pub user_metadata: serde_json::Value,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    /// Creates a user with only an identifier.
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            email: None,
            phone: None,
            role: None,
            app_metadata: serde_json::Value::Null,
            user_metadata: serde_json::Value::Null,
            created_at: None,
        }
    }

    /// Sets the email address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the role claim.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }
}
