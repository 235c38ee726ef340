//! Session record as seen by the front-end.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::User;

/// An authenticated browsing period issued by the auth provider.
///
/// Tokens are deliberately absent: they stay inside the provider adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    user: User,
    #[serde(default)]
    expires_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Creates a session for `user` with no known expiry.
    pub fn new(user: User) -> Self {
        Self {
            user,
            expires_at: None,
        }
    }

    /// Sets the access token expiry.
    pub fn with_expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// Consumes the session, keeping only its user.
    pub fn into_user(self) -> User {
        self.user
    }

    /// Returns true if the session has a known expiry at or before `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.map_or(false, |exp| exp <= now)
    }
}

/// Projects an optional session onto its user (`None` when signed out).
pub fn user_of(session: Option<Session>) -> Option<User> {
    session.map(Session::into_user)
}
