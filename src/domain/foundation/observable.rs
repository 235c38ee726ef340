//! Observable cell - a current value plus change subscription.
//!
//! Backed by a `tokio::sync::watch` channel. The cell owns the sender, so
//! writes never fail for lack of receivers, and every subscriber sees the
//! latest value (intermediate values may be skipped by slow readers).
//!
//! # Example
//!
//! ```ignore
//! let loading = Observable::new(true);
//! let mut rx = loading.subscribe();
//!
//! loading.set(false);
//! rx.changed().await?;
//! assert!(!*rx.borrow());
//! ```

use std::fmt;

use tokio::sync::watch;

/// A holder of the most recently written value that dependents can observe.
pub struct Observable<T> {
    tx: watch::Sender<T>,
}

impl<T> Observable<T> {
    /// Creates a cell holding `initial`.
    pub fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Replaces the current value and notifies subscribers.
    ///
    /// Subscribers are notified even if the value is unchanged.
    pub fn set(&self, value: T) {
        self.tx.send_replace(value);
    }

    /// Returns a receiver that observes every subsequent write.
    ///
    /// The receiver starts with the current value marked as seen.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }
}

impl<T: Clone> Observable<T> {
    /// Returns a clone of the current value.
    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }
}

impl<T: Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("value", &*self.tx.borrow())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_returns_initial_value() {
        let cell = Observable::new(Some(3));
        assert_eq!(cell.get(), Some(3));
    }

    #[test]
    fn set_replaces_value() {
        let cell = Observable::new(true);
        cell.set(false);
        assert!(!cell.get());
    }

    #[test]
    fn set_without_subscribers_does_not_fail() {
        let cell: Observable<Option<String>> = Observable::default();
        cell.set(Some("x".to_string()));
        assert_eq!(cell.get(), Some("x".to_string()));
    }

    #[tokio::test]
    async fn subscriber_is_notified_of_changes() {
        let cell = Observable::new(0u32);
        let mut rx = cell.subscribe();

        cell.set(7);

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), 7);
    }

    #[tokio::test]
    async fn subscriber_sees_latest_of_several_writes() {
        let cell = Observable::new(0u32);
        let mut rx = cell.subscribe();

        cell.set(1);
        cell.set(2);
        cell.set(3);

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), 3);
    }

    #[test]
    fn debug_shows_value() {
        let cell = Observable::new(42);
        assert_eq!(format!("{:?}", cell), "Observable { value: 42 }");
    }
}
