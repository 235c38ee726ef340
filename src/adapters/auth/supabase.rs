//! Supabase GoTrue adapter for session state.
//!
//! This adapter implements the `AuthProvider` port against a Supabase project's
//! auth API. It holds the tokens of the current sign-in and resolves the
//! session's user by calling `GET /auth/v1/user`:
//!
//! 1. `set_session` stores tokens handed over by the sign-in flow, resolves
//!    the user, and emits `SIGNED_IN`
//! 2. `get_session` re-resolves the user for the stored token
//! 3. `sign_out` revokes the token (best effort), forgets it, and emits
//!    `SIGNED_OUT`
//!
//! Only the access token is kept; it is never refreshed or persisted here.
//!
//! # Example
//!
//! ```ignore
//! use session_reflector::adapters::auth::{SupabaseAuthProvider, SupabaseConfig};
//!
//! let config = SupabaseConfig::new("https://xyz.supabase.co", anon_key);
//! let provider = SupabaseAuthProvider::new(config)?;
//!
//! provider.set_session(access_token, None).await?;
//! let session = provider.get_session().await?;
//! ```

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use tokio::sync::RwLock;

use super::ListenerRegistry;
use crate::domain::foundation::AuthError;
use crate::domain::session::{AuthChangeEvent, Session, User};
use crate::ports::{AuthProvider, AuthStateListener, Subscription};

/// Connection settings for a Supabase project.
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    /// Project URL (e.g. "https://xyz.supabase.co")
    pub url: String,

    /// Public anon key, sent as the `apikey` header.
    pub anon_key: SecretString,

    /// Per-request timeout. Defaults to 10 seconds if not specified.
    pub request_timeout: Option<Duration>,
}

impl SupabaseConfig {
    /// Create a new configuration with required fields.
    pub fn new(url: impl Into<String>, anon_key: SecretString) -> Self {
        Self {
            url: url.into(),
            anon_key,
            request_timeout: None,
        }
    }

    /// Set a custom request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.url.trim_end_matches('/'), path)
    }

    fn user_url(&self) -> String {
        self.endpoint("user")
    }

    fn logout_url(&self) -> String {
        self.endpoint("logout")
    }
}

/// Token of the current sign-in and the session it was last resolved to.
struct StoredTokens {
    access_token: SecretString,
    session: Session,
}

/// Supabase-backed auth provider.
pub struct SupabaseAuthProvider {
    config: SupabaseConfig,
    http_client: reqwest::Client,
    tokens: RwLock<Option<StoredTokens>>,
    listeners: ListenerRegistry,
}

impl SupabaseAuthProvider {
    /// Create a provider with no one signed in.
    ///
    /// Does not contact the auth API.
    pub fn new(config: SupabaseConfig) -> Result<Self, AuthError> {
        let timeout = config.request_timeout.unwrap_or(Duration::from_secs(10));
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to create HTTP client: {}", e);
                AuthError::service_unavailable(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            config,
            http_client,
            tokens: RwLock::new(None),
            listeners: ListenerRegistry::new(),
        })
    }

    /// Adopt the tokens of a completed sign-in.
    ///
    /// The user is resolved before the tokens are stored, so a rejected token
    /// leaves the previous state untouched. On success listeners receive
    /// `SIGNED_IN`.
    pub async fn set_session(
        &self,
        access_token: SecretString,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<Session, AuthError> {
        let user = self.fetch_user(access_token.expose_secret()).await?;
        let session = build_session(user, expires_at);

        *self.tokens.write().await = Some(StoredTokens {
            access_token,
            session: session.clone(),
        });

        self.listeners.notify(AuthChangeEvent::SignedIn, Some(&session));
        Ok(session)
    }

    /// Forget the current sign-in and emit `SIGNED_OUT`.
    ///
    /// Token revocation is best effort: a failed logout call is logged and
    /// the local sign-out still happens.
    pub async fn sign_out(&self) {
        let previous = self.tokens.write().await.take();

        if let Some(tokens) = previous {
            if let Err(e) = self.revoke(tokens.access_token.expose_secret()).await {
                tracing::warn!("Token revocation failed, signing out locally: {}", e);
            }
        }

        self.listeners.notify(AuthChangeEvent::SignedOut, None);
    }

    /// Returns true if tokens are currently stored.
    pub async fn has_session(&self) -> bool {
        self.tokens.read().await.is_some()
    }

    /// Returns the number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Resolve the user owning `access_token`.
    async fn fetch_user(&self, access_token: &str) -> Result<User, AuthError> {
        let url = self.config.user_url();

        tracing::debug!("Fetching user from {}", url);

        let response = self
            .http_client
            .get(&url)
            .header("apikey", self.config.anon_key.expose_secret())
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to reach auth API: {}", e);
                AuthError::service_unavailable(format!("Failed to reach auth API: {}", e))
            })?;

        let status = response.status();
        if let Some(error) = error_for_status(status) {
            if error.is_transient() {
                tracing::error!("Auth API returned {}", status);
            } else {
                tracing::warn!("Auth API rejected token: {}", status);
            }
            return Err(error);
        }

        response.json::<User>().await.map_err(|e| {
            tracing::error!("Failed to parse user: {}", e);
            AuthError::malformed_response(format!("Failed to parse user: {}", e))
        })
    }

    async fn revoke(&self, access_token: &str) -> Result<(), AuthError> {
        let response = self
            .http_client
            .post(self.config.logout_url())
            .header("apikey", self.config.anon_key.expose_secret())
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AuthError::service_unavailable(format!("Logout request failed: {}", e)))?;

        match error_for_status(response.status()) {
            // An already-invalid token is as signed out as it gets
            Some(AuthError::InvalidToken) | None => Ok(()),
            Some(error) => Err(error),
        }
    }
}

#[async_trait]
impl AuthProvider for SupabaseAuthProvider {
    async fn get_session(&self) -> Result<Option<Session>, AuthError> {
        // Copy what we need so the lock is not held across the request
        let stored = {
            let tokens = self.tokens.read().await;
            tokens
                .as_ref()
                .map(|t| (t.access_token.expose_secret().clone(), t.session.clone()))
        };

        let Some((access_token, previous)) = stored else {
            return Ok(None);
        };

        if previous.is_expired_at(Utc::now()) {
            tracing::debug!("Stored access token has expired");
            return Err(AuthError::TokenExpired);
        }

        let user = self.fetch_user(&access_token).await?;
        Ok(Some(build_session(user, previous.expires_at())))
    }

    fn on_auth_state_change(&self, listener: Arc<dyn AuthStateListener>) -> Subscription {
        self.listeners.register(listener)
    }
}

fn build_session(user: User, expires_at: Option<DateTime<Utc>>) -> Session {
    match expires_at {
        Some(exp) => Session::new(user).with_expires_at(exp),
        None => Session::new(user),
    }
}

/// Maps a non-success status to the matching domain error.
fn error_for_status(status: StatusCode) -> Option<AuthError> {
    if status.is_success() {
        return None;
    }
    Some(match status.as_u16() {
        401 | 403 => AuthError::InvalidToken,
        404 => AuthError::UserNotFound,
        _ => AuthError::service_unavailable(format!("Auth API returned {}", status)),
    })
}
