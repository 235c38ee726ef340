//! RenderTarget enum gating side effects that need a browsing context.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the front-end is being rendered.
///
/// Session reflection only runs in `Browser`; server-side rendering has no
/// user session to mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RenderTarget {
    #[default]
    Browser,
    Server,
}

impl RenderTarget {
    /// Returns true if a browsing context is available.
    pub fn has_browsing_context(&self) -> bool {
        matches!(self, RenderTarget::Browser)
    }
}

impl fmt::Display for RenderTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RenderTarget::Browser => "browser",
            RenderTarget::Server => "server",
        };
        write!(f, "{}", s)
    }
}
