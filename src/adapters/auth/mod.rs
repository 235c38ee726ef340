//! Authentication adapters.
//!
//! Implementations of the `AuthProvider` port:
//!
//! - `mock` - Scriptable provider for tests, no external services
//! - `supabase` - Supabase GoTrue HTTP adapter
//!
//! Both dispatch change notifications through the shared `ListenerRegistry`.

mod listeners;
mod mock;
mod supabase;

pub use listeners::ListenerRegistry;
pub use mock::MockAuthProvider;
pub use supabase::{SupabaseAuthProvider, SupabaseConfig};
