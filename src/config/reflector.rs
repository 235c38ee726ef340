//! Session reflector configuration

use serde::Deserialize;

use crate::domain::foundation::RenderTarget;

/// What the loading flag does when the initial session fetch fails.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FetchFailurePolicy {
    /// Clear the loading flag so the UI can render a signed-out state.
    #[default]
    Settle,
    /// Leave the loading flag set; the UI keeps waiting.
    Stall,
}

/// Session reflector configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ReflectorConfig {
    /// Rendering environment; reflection only runs in the browser
    #[serde(default)]
    pub render_target: RenderTarget,

    /// Loading flag behavior on initial fetch failure
    #[serde(default)]
    pub on_fetch_error: FetchFailurePolicy,
}

impl ReflectorConfig {
    /// Configuration for server-side rendering (reflection disabled).
    pub fn server() -> Self {
        Self {
            render_target: RenderTarget::Server,
            ..Default::default()
        }
    }

    /// Set the fetch failure policy.
    pub fn with_fetch_failure_policy(mut self, policy: FetchFailurePolicy) -> Self {
        self.on_fetch_error = policy;
        self
    }
}
