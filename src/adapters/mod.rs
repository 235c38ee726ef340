//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - Auth provider implementations (mock, Supabase)

pub mod auth;

pub use auth::{ListenerRegistry, MockAuthProvider, SupabaseAuthProvider, SupabaseConfig};
