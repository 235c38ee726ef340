//! Mock auth provider for testing.
//!
//! Implements the `AuthProvider` port without a real auth service. Tests
//! script the initial session, force fetch errors, hold the initial fetch
//! open, and emit change notifications by hand.
//!
//! # Example
//!
//! ```ignore
//! use session_reflector::adapters::auth::MockAuthProvider;
//! use session_reflector::domain::session::AuthChangeEvent;
//!
//! let provider = MockAuthProvider::new().with_test_user("user-123");
//!
//! let session = provider.get_session().await?;
//! assert!(session.is_some());
//!
//! // Later, simulate a logout
//! provider.emit(AuthChangeEvent::SignedOut, None);
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use tokio::sync::Notify;

use super::ListenerRegistry;
use crate::domain::foundation::{AuthError, UserId};
use crate::domain::session::{AuthChangeEvent, Session, User};
use crate::ports::{AuthProvider, AuthStateListener, Subscription};

/// Mock auth provider for testing.
///
/// Returns the scripted session from `get_session` and dispatches `emit`ted
/// changes to registered listeners.
#[derive(Default)]
pub struct MockAuthProvider {
    /// Session returned by `get_session`
    session: RwLock<Option<Session>>,
    /// Optional error to return for all fetches (for error testing)
    force_error: RwLock<Option<AuthError>>,
    /// When set, fetches wait for `release_fetch`
    fetch_gate: RwLock<Option<Arc<Notify>>>,
    listeners: ListenerRegistry,
    fetch_count: AtomicUsize,
}

impl MockAuthProvider {
    /// Creates a mock provider with no one signed in.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the session reported by `get_session`.
    pub fn with_session(self, session: Session) -> Self {
        self.set_session(Some(session));
        self
    }

    /// Sets a session for `user`.
    pub fn with_user(self, user: User) -> Self {
        self.with_session(Session::new(user))
    }

    /// Sets a session for a simple test user.
    ///
    /// Convenience method that creates a user with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if `user_id` is empty.
    pub fn with_test_user(self, user_id: impl Into<String>) -> Self {
        let user_id = user_id.into();
        let user = User::new(UserId::new(&user_id).expect("test user id must not be empty"))
            .with_email(format!("{}@test.example.com", user_id))
            .with_role("authenticated");
        self.with_user(user)
    }

    /// Forces all fetches to return the specified error.
    ///
    /// Useful for testing error handling paths.
    pub fn with_error(self, error: AuthError) -> Self {
        *self
            .force_error
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(error);
        self
    }

    /// Makes every fetch wait until `release_fetch` is called.
    pub fn with_held_fetch(self) -> Self {
        *self
            .fetch_gate
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(Notify::new()));
        self
    }

    /// Lets one held fetch complete.
    ///
    /// If no fetch is waiting yet, the next one completes immediately.
    pub fn release_fetch(&self) {
        let gate = self
            .fetch_gate
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        if let Some(gate) = gate {
            gate.notify_one();
        }
    }

    /// Clears the forced error and returns to normal operation.
    pub fn clear_error(&self) {
        *self
            .force_error
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Replaces the session reported by `get_session` without notifying.
    pub fn set_session(&self, session: Option<Session>) {
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = session;
    }

    /// Simulates an auth-state change.
    ///
    /// The new session becomes the one `get_session` reports, then every
    /// registered listener is notified.
    pub fn emit(&self, event: AuthChangeEvent, session: Option<Session>) {
        self.set_session(session.clone());
        self.listeners.notify(event, session.as_ref());
    }

    /// Returns the number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Returns how many times `get_session` has been called.
    pub fn fetch_count(&self) -> usize {
        self.fetch_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthProvider for MockAuthProvider {
    async fn get_session(&self) -> Result<Option<Session>, AuthError> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);

        // Clone the gate out so no lock guard is held across the await
        let gate = self
            .fetch_gate
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        if let Some(error) = self
            .force_error
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
        {
            return Err(error);
        }

        Ok(self
            .session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn on_auth_state_change(&self, listener: Arc<dyn AuthStateListener>) -> Subscription {
        self.listeners.register(listener)
    }
}
