//! Subscription handle for auth-state listeners.
//!
//! Returned by `AuthProvider::on_auth_state_change`. The listener stays
//! registered exactly as long as the handle lives: dropping it (or calling
//! `unsubscribe`) removes the listener from the provider.

use std::fmt;

use crate::domain::foundation::SubscriptionId;

type Release = Box<dyn FnOnce() + Send>;

/// Scoped registration of an auth-state listener.
#[must_use = "dropping a Subscription unregisters its listener immediately"]
pub struct Subscription {
    id: SubscriptionId,
    release: Option<Release>,
}

impl Subscription {
    /// Creates a handle that runs `release` when dropped or unsubscribed.
    pub fn new(id: SubscriptionId, release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            id,
            release: Some(Box::new(release)),
        }
    }

    /// Creates a handle with nothing to release.
    ///
    /// For providers whose listeners are not retained (e.g. a provider that
    /// never emits changes).
    pub fn detached(id: SubscriptionId) -> Self {
        Self { id, release: None }
    }

    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Returns true until the listener has been released.
    pub fn is_active(&self) -> bool {
        self.release.is_some()
    }

    /// Unregisters the listener now.
    pub fn unsubscribe(mut self) {
        self.release_listener();
    }

    fn release_listener(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_listener();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}
