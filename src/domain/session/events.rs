//! Auth-state change events.
//!
//! The provider tags every change notification with one of these kinds. The
//! reflector logs the kind but treats every notification the same way: it
//! republishes the accompanying session's user.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of auth-state change reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthChangeEvent {
    /// Emitted once when a listener attaches and a session is already known.
    InitialSession,
    SignedIn,
    SignedOut,
    TokenRefreshed,
    UserUpdated,
    PasswordRecovery,
}

impl AuthChangeEvent {
    /// Returns the provider's wire name for this event.
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthChangeEvent::InitialSession => "INITIAL_SESSION",
            AuthChangeEvent::SignedIn => "SIGNED_IN",
            AuthChangeEvent::SignedOut => "SIGNED_OUT",
            AuthChangeEvent::TokenRefreshed => "TOKEN_REFRESHED",
            AuthChangeEvent::UserUpdated => "USER_UPDATED",
            AuthChangeEvent::PasswordRecovery => "PASSWORD_RECOVERY",
        }
    }
}

impl fmt::Display for AuthChangeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_provider_wire_names() {
        let json = serde_json::to_string(&AuthChangeEvent::TokenRefreshed).unwrap();
        assert_eq!(json, "\"TOKEN_REFRESHED\"");
    }

    #[test]
    fn deserializes_provider_wire_names() {
        let event: AuthChangeEvent = serde_json::from_str("\"SIGNED_OUT\"").unwrap();
        assert_eq!(event, AuthChangeEvent::SignedOut);
    }

    #[test]
    fn display_matches_serialized_name() {
        for event in [
            AuthChangeEvent::InitialSession,
            AuthChangeEvent::SignedIn,
            AuthChangeEvent::SignedOut,
            AuthChangeEvent::TokenRefreshed,
            AuthChangeEvent::UserUpdated,
            AuthChangeEvent::PasswordRecovery,
        ] {
            let json = serde_json::to_string(&event).unwrap();
            assert_eq!(json, format!("\"{}\"", event));
        }
    }
}
