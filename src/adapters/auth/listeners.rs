//! Listener registry shared by the auth adapters.
//!
//! Keeps registered `AuthStateListener`s in registration order and hands out
//! `Subscription`s that remove their listener when released. The release
//! closure only holds a weak reference, so a subscription outliving its
//! provider is harmless.

use std::sync::{Arc, PoisonError, RwLock, Weak};

use crate::domain::foundation::SubscriptionId;
use crate::domain::session::{AuthChangeEvent, Session};
use crate::ports::{AuthStateListener, Subscription};

type Entries = RwLock<Vec<(SubscriptionId, Arc<dyn AuthStateListener>)>>;

/// Registry of auth-state listeners.
#[derive(Clone, Default)]
pub struct ListenerRegistry {
    entries: Arc<Entries>,
}

impl ListenerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `listener` and returns the handle that removes it.
    pub fn register(&self, listener: Arc<dyn AuthStateListener>) -> Subscription {
        let id = SubscriptionId::new();
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, listener));

        let entries: Weak<Entries> = Arc::downgrade(&self.entries);
        Subscription::new(id, move || {
            if let Some(entries) = entries.upgrade() {
                entries
                    .write()
                    .unwrap_or_else(PoisonError::into_inner)
                    .retain(|(registered, _)| *registered != id);
                tracing::debug!(subscription_id = %id, "Auth state listener removed");
            }
        })
    }

    /// Invokes every registered listener, in registration order.
    ///
    /// Listeners are snapshotted first so a listener may register or release
    /// subscriptions without deadlocking. Each entry is re-checked right
    /// before its call, so one released mid-dispatch is skipped.
    pub fn notify(&self, event: AuthChangeEvent, session: Option<&Session>) {
        let listeners: Vec<(SubscriptionId, Arc<dyn AuthStateListener>)> = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(id, listener)| (*id, Arc::clone(listener)))
            .collect();

        tracing::debug!(
            event = %event,
            listeners = listeners.len(),
            has_session = session.is_some(),
            "Dispatching auth state change"
        );

        for (id, listener) in listeners {
            if self.is_registered(id) {
                listener.on_auth_state_change(event, session);
            }
        }
    }

    fn is_registered(&self, id: SubscriptionId) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|(registered, _)| *registered == id)
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
