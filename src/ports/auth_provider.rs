//! Auth provider port - the session contract consumed from the auth SDK.
//!
//! The reflector needs exactly two things from a provider:
//!
//! - **get_session**: a one-shot read of the current session
//! - **on_auth_state_change**: a persistent change-notification stream
//!
//! # Example
//!
//! ```ignore
//! let provider: Arc<dyn AuthProvider> = Arc::new(MockAuthProvider::new());
//!
//! let subscription = provider.on_auth_state_change(Arc::new(
//!     |event: AuthChangeEvent, session: Option<&Session>| {
//!         println!("{} -> signed in: {}", event, session.is_some());
//!     },
//! ));
//!
//! let session = provider.get_session().await?;
//! drop(subscription); // listener removed
//! ```

use std::sync::Arc;

use async_trait::async_trait;

use super::Subscription;
use crate::domain::foundation::AuthError;
use crate::domain::session::{AuthChangeEvent, Session};

/// Callback invoked for every auth-state change.
///
/// Called synchronously from whatever task the provider emits on, so
/// implementations should be quick and must not block.
pub trait AuthStateListener: Send + Sync {
    /// `session` is `None` when the change leaves no one signed in.
    fn on_auth_state_change(&self, event: AuthChangeEvent, session: Option<&Session>);
}

impl<F> AuthStateListener for F
where
    F: Fn(AuthChangeEvent, Option<&Session>) + Send + Sync,
{
    fn on_auth_state_change(&self, event: AuthChangeEvent, session: Option<&Session>) {
        self(event, session)
    }
}

/// Session source backed by an external authentication provider.
///
/// # Contract
///
/// Implementations must:
/// - Return `Ok(None)` from `get_session` when no one is signed in
/// - Return `AuthError::ServiceUnavailable` for transient errors
/// - Keep a listener registered until its `Subscription` is dropped, and
///   start no new invocation of it once the drop has returned (a call
///   already running on another thread may still finish)
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Fetch the current session, if any.
    async fn get_session(&self) -> Result<Option<Session>, AuthError>;

    /// Register `listener` for every future auth-state change.
    fn on_auth_state_change(&self, listener: Arc<dyn AuthStateListener>) -> Subscription;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{SubscriptionId, UserId};
    use crate::domain::session::User;
    use std::sync::{Mutex, RwLock};

    /// Simple provider that always reports the same session and drops listeners
    struct FixedSessionProvider {
        session: RwLock<Option<Session>>,
    }

    #[async_trait]
    impl AuthProvider for FixedSessionProvider {
        async fn get_session(&self) -> Result<Option<Session>, AuthError> {
            Ok(self.session.read().unwrap().clone())
        }

        fn on_auth_state_change(&self, _listener: Arc<dyn AuthStateListener>) -> Subscription {
            Subscription::detached(SubscriptionId::new())
        }
    }

    fn test_session() -> Session {
        Session::new(User::new(UserId::new("user-123").unwrap()))
    }

    #[tokio::test]
    async fn provider_returns_session_when_signed_in() {
        let provider = FixedSessionProvider {
            session: RwLock::new(Some(test_session())),
        };

        let session = provider.get_session().await.unwrap();

        assert_eq!(session.unwrap().user().id.as_str(), "user-123");
    }

    #[tokio::test]
    async fn provider_returns_none_when_signed_out() {
        let provider = FixedSessionProvider {
            session: RwLock::new(None),
        };

        assert!(provider.get_session().await.unwrap().is_none());
    }

    #[test]
    fn closures_are_listeners() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let listener: Arc<dyn AuthStateListener> =
            Arc::new(move |event: AuthChangeEvent, session: Option<&Session>| {
                sink.lock().unwrap().push((event, session.is_some()));
            });

        listener.on_auth_state_change(AuthChangeEvent::SignedIn, Some(&test_session()));
        listener.on_auth_state_change(AuthChangeEvent::SignedOut, None);

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                (AuthChangeEvent::SignedIn, true),
                (AuthChangeEvent::SignedOut, false)
            ]
        );
    }

    #[test]
    fn auth_provider_trait_is_object_safe_and_send_sync() {
        fn _assert_trait_object(_: &dyn AuthProvider) {}
        fn _assert_arc_send_sync<T: Send + Sync + ?Sized>() {}
        _assert_arc_send_sync::<Arc<dyn AuthProvider>>();
        _assert_arc_send_sync::<Arc<dyn AuthStateListener>>();
    }
}
