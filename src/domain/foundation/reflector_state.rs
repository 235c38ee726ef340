//! ReflectorState enum for tracking the lifecycle of a session reflector.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a session reflector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReflectorState {
    #[default]
    Uninitialized,
    AwaitingInitialFetch,
    Subscribed,
    TornDown,
}

impl ReflectorState {
    /// Validates a transition from this state to another.
    ///
    /// Valid transitions:
    /// - Uninitialized -> AwaitingInitialFetch
    /// - AwaitingInitialFetch -> Subscribed
    /// - AwaitingInitialFetch -> TornDown
    /// - Subscribed -> TornDown
    /// - TornDown -> AwaitingInitialFetch
    pub fn can_transition_to(&self, target: &ReflectorState) -> bool {
        use ReflectorState::*;
        matches!(
            (self, target),
            (Uninitialized, AwaitingInitialFetch)
                | (AwaitingInitialFetch, Subscribed)
                | (AwaitingInitialFetch, TornDown)
                | (Subscribed, TornDown)
                | (TornDown, AwaitingInitialFetch)
        )
    }
}

impl fmt::Display for ReflectorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReflectorState::Uninitialized => "Uninitialized",
            ReflectorState::AwaitingInitialFetch => "AwaitingInitialFetch",
            ReflectorState::Subscribed => "Subscribed",
            ReflectorState::TornDown => "TornDown",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ReflectorState::*;

    #[test]
    fn default_is_uninitialized() {
        assert_eq!(ReflectorState::default(), Uninitialized);
    }

    #[test]
    fn forward_lifecycle_is_allowed() {
        assert!(Uninitialized.can_transition_to(&AwaitingInitialFetch));
        assert!(AwaitingInitialFetch.can_transition_to(&Subscribed));
        assert!(Subscribed.can_transition_to(&TornDown));
    }

    #[test]
    fn torn_down_can_be_reinitialized() {
        assert!(TornDown.can_transition_to(&AwaitingInitialFetch));
    }

    #[test]
    fn teardown_during_initial_fetch_is_allowed() {
        assert!(AwaitingInitialFetch.can_transition_to(&TornDown));
    }

    #[test]
    fn skipping_the_initial_fetch_is_rejected() {
        assert!(!Uninitialized.can_transition_to(&Subscribed));
        assert!(!TornDown.can_transition_to(&Subscribed));
    }

    #[test]
    fn subscribed_cannot_restart_without_teardown() {
        assert!(!Subscribed.can_transition_to(&AwaitingInitialFetch));
        assert!(!Subscribed.can_transition_to(&Uninitialized));
    }

    #[test]
    fn serializes_as_snake_case() {
        let json = serde_json::to_string(&AwaitingInitialFetch).unwrap();
        assert_eq!(json, "\"awaiting_initial_fetch\"");
    }

    #[test]
    fn display_uses_variant_name() {
        assert_eq!(TornDown.to_string(), "TornDown");
    }
}
