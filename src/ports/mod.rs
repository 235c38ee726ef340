//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Auth Ports
//!
//! - `AuthProvider` - Session fetch and change stream from the auth SDK
//! - `AuthStateListener` - Callback invoked on every auth-state change
//! - `Subscription` - Scoped listener registration, released on drop

mod auth_provider;
mod subscription;

pub use auth_provider::{AuthProvider, AuthStateListener};
pub use subscription::Subscription;
