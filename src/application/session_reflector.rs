//! SessionReflector - mirrors the auth provider's session into observable cells.
//!
//! The reflector owns three cells that UI code binds to:
//!
//! - `current_user` - the signed-in user, `None` when signed out (initially `None`)
//! - `is_loading` - `true` until the initial session fetch settles, then `false` forever
//! - `last_error` - the most recent initial-fetch failure, if any
//!
//! `initialize` registers a listener on the provider's change stream and then
//! fetches the current session once. Both sources write `current_user`; the
//! last one to arrive wins.
//!
//! # Example
//!
//! ```ignore
//! let reflector = SessionReflector::new(provider, ReflectorConfig::default());
//! let mut user_rx = reflector.current_user().subscribe();
//!
//! reflector.initialize().await?;
//! assert!(!reflector.is_loading().get());
//!
//! while user_rx.changed().await.is_ok() {
//!     render(user_rx.borrow_and_update().as_ref());
//! }
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;

use crate::config::{FetchFailurePolicy, ReflectorConfig};
use crate::domain::foundation::{AuthError, Observable, ReflectorState, SubscriptionId};
use crate::domain::session::{user_of, AuthChangeEvent, Session, User};
use crate::ports::{AuthProvider, AuthStateListener, Subscription};

/// Result of a successful `initialize` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// Listener registered and initial session applied.
    Ready,
    /// No browsing context; nothing was fetched or registered.
    Skipped,
    /// Torn down and initialized again before this fetch settled; the
    /// result was discarded in favor of the newer cycle.
    Superseded,
}

/// Errors from the reflector lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReflectorError {
    /// A listener is already registered; call `teardown` first.
    #[error("Session reflector is already initialized")]
    AlreadyInitialized,

    /// The initial session fetch failed. The listener stays registered.
    #[error("Initial session fetch failed: {0}")]
    InitialFetch(#[from] AuthError),
}

/// Writes every auth-state change into the `current_user` cell.
struct CurrentUserListener {
    current_user: Arc<Observable<Option<User>>>,
}

impl AuthStateListener for CurrentUserListener {
    fn on_auth_state_change(&self, event: AuthChangeEvent, session: Option<&Session>) {
        tracing::debug!(event = %event, signed_in = session.is_some(), "Auth state changed");
        self.current_user.set(session.map(|s| s.user().clone()));
    }
}

/// Listener held by the current cycle, and the id of the latest cycle
/// started (kept after teardown).
#[derive(Default)]
struct Cycle {
    subscription: Option<Subscription>,
    latest: Option<SubscriptionId>,
}

/// Application-level holder of the reflected session state.
pub struct SessionReflector {
    provider: Arc<dyn AuthProvider>,
    config: ReflectorConfig,
    current_user: Arc<Observable<Option<User>>>,
    is_loading: Observable<bool>,
    last_error: Observable<Option<AuthError>>,
    state: Observable<ReflectorState>,
    cycle: Mutex<Cycle>,
}

impl SessionReflector {
    /// Creates an uninitialized reflector.
    ///
    /// Nothing is fetched or registered until `initialize` is called.
    pub fn new(provider: Arc<dyn AuthProvider>, config: ReflectorConfig) -> Self {
        Self {
            provider,
            config,
            current_user: Arc::new(Observable::new(None)),
            is_loading: Observable::new(true),
            last_error: Observable::new(None),
            state: Observable::new(ReflectorState::Uninitialized),
            cycle: Mutex::new(Cycle::default()),
        }
    }

    /// The signed-in user, `None` when signed out or not yet known.
    pub fn current_user(&self) -> &Observable<Option<User>> {
        &self.current_user
    }

    /// `true` until the initial session fetch settles.
    pub fn is_loading(&self) -> &Observable<bool> {
        &self.is_loading
    }

    /// The most recent initial-fetch failure.
    pub fn last_error(&self) -> &Observable<Option<AuthError>> {
        &self.last_error
    }

    pub fn state(&self) -> ReflectorState {
        self.state.get()
    }

    /// Starts mirroring the provider's session state.
    ///
    /// Registers the change listener, then awaits the initial fetch. Without
    /// a browsing context this is a no-op returning `InitOutcome::Skipped`.
    ///
    /// # Errors
    ///
    /// - `ReflectorError::AlreadyInitialized` if a listener is already held
    /// - `ReflectorError::InitialFetch` if the initial fetch failed; the error
    ///   is also published in `last_error` and the listener stays registered
    ///
    /// A fetch that settles after `teardown` still writes the cells, while
    /// the state stays `TornDown`. If another `initialize` started in the
    /// meantime the result is dropped and `InitOutcome::Superseded` returned.
    pub async fn initialize(&self) -> Result<InitOutcome, ReflectorError> {
        if !self.config.render_target.has_browsing_context() {
            tracing::debug!(
                render_target = %self.config.render_target,
                "No browsing context, session reflection skipped"
            );
            return Ok(InitOutcome::Skipped);
        }

        let registered = {
            let mut cycle = self.lock_cycle();
            if cycle.subscription.is_some() {
                return Err(ReflectorError::AlreadyInitialized);
            }

            let listener = Arc::new(CurrentUserListener {
                current_user: Arc::clone(&self.current_user),
            });
            let subscription = self.provider.on_auth_state_change(listener);
            let id = subscription.id();
            tracing::debug!(subscription_id = %id, "Auth state listener registered");

            cycle.subscription = Some(subscription);
            cycle.latest = Some(id);
            self.transition(ReflectorState::AwaitingInitialFetch);
            id
        };

        let fetched = self.provider.get_session().await;

        // Held while applying so teardown and a newer initialize see either
        // none or all of this cycle's writes.
        let cycle = self.lock_cycle();
        if cycle.latest != Some(registered) {
            tracing::debug!(
                subscription_id = %registered,
                "Initial fetch superseded by a newer initialization, result discarded"
            );
            return Ok(InitOutcome::Superseded);
        }

        let outcome = self.apply_initial_fetch(fetched);

        // Torn down while fetching: state stays TornDown
        if cycle.subscription.is_some() {
            self.transition(ReflectorState::Subscribed);
        }
        drop(cycle);

        outcome
    }

    fn apply_initial_fetch(
        &self,
        fetched: Result<Option<Session>, AuthError>,
    ) -> Result<InitOutcome, ReflectorError> {
        match fetched {
            Ok(session) => {
                let user = user_of(session);
                tracing::debug!(signed_in = user.is_some(), "Initial session fetched");
                self.current_user.set(user);
                self.last_error.set(None);
                self.is_loading.set(false);
                Ok(InitOutcome::Ready)
            }
            Err(error) => {
                tracing::warn!(
                    error = %error,
                    reauthenticate = error.requires_reauthentication(),
                    policy = ?self.config.on_fetch_error,
                    "Initial session fetch failed"
                );
                self.last_error.set(Some(error.clone()));
                if self.config.on_fetch_error == FetchFailurePolicy::Settle {
                    self.is_loading.set(false);
                }
                Err(ReflectorError::InitialFetch(error))
            }
        }
    }

    /// Unregisters the change listener.
    ///
    /// Cells keep their last values. Safe to call repeatedly; a torn-down
    /// reflector may be initialized again.
    pub fn teardown(&self) {
        let released = {
            let mut cycle = self.lock_cycle();
            let released = cycle.subscription.take();
            if released.is_some() {
                self.transition(ReflectorState::TornDown);
            }
            released
        };

        if let Some(subscription) = released {
            tracing::debug!(subscription_id = %subscription.id(), "Releasing auth state listener");
            subscription.unsubscribe();
        }
    }

    /// Resolves once `is_loading` is `false`.
    ///
    /// Never resolves while the initial fetch is pending, nor after a failed
    /// fetch under `FetchFailurePolicy::Stall`.
    pub async fn loaded(&self) {
        let mut loading = self.is_loading.subscribe();
        while *loading.borrow_and_update() {
            if loading.changed().await.is_err() {
                return;
            }
        }
    }

    /// Applies a lifecycle transition; invalid transitions are ignored.
    ///
    /// Callers hold the cycle lock so transitions are serialized.
    fn transition(&self, target: ReflectorState) {
        let current = self.state.get();
        if current.can_transition_to(&target) {
            self.state.set(target);
        } else {
            tracing::debug!(from = %current, to = %target, "Ignoring lifecycle transition");
        }
    }

    fn lock_cycle(&self) -> MutexGuard<'_, Cycle> {
        self.cycle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
