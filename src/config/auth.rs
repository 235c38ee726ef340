//! Authentication provider configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Authentication provider configuration (Supabase)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Supabase project URL
    pub supabase_url: String,

    /// Public anon key for the project
    pub supabase_anon_key: SecretString,

    /// Auth API request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Access token of an existing sign-in to adopt at startup
    #[serde(default)]
    pub access_token: Option<SecretString>,
}

impl AuthConfig {
    /// Get request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate authentication configuration
    ///
    /// Requires HTTPS for the project URL, except for loopback hosts used in
    /// local development.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.supabase_url.is_empty() {
            return Err(ValidationError::MissingRequired("SUPABASE_URL"));
        }
        if self.supabase_anon_key.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("SUPABASE_ANON_KEY"));
        }

        if let Some(rest) = self.supabase_url.strip_prefix("http://") {
            if !is_loopback(rest) {
                return Err(ValidationError::SupabaseUrlMustBeHttps);
            }
        } else if !self.supabase_url.starts_with("https://") {
            return Err(ValidationError::InvalidSupabaseUrl);
        }

        if self.request_timeout_secs == 0 || self.request_timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }

        if let Some(token) = &self.access_token {
            if token.expose_secret().trim().is_empty() {
                return Err(ValidationError::EmptyAccessToken);
            }
        }

        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            supabase_url: String::new(),
            supabase_anon_key: SecretString::new(String::new()),
            request_timeout_secs: default_request_timeout(),
            access_token: None,
        }
    }
}

fn is_loopback(host_and_path: &str) -> bool {
    ["localhost", "127.0.0.1", "[::1]"].iter().any(|host| {
        host_and_path
            .strip_prefix(host)
            .map_or(false, |rest| rest.is_empty() || rest.starts_with([':', '/']))
    })
}

fn default_request_timeout() -> u64 {
    10
}
