//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the session reflector.

mod auth;
mod errors;
mod ids;
mod observable;
mod reflector_state;
mod render_target;

pub use auth::AuthError;
pub use errors::ValidationError;
pub use ids::{SubscriptionId, UserId};
pub use observable::Observable;
pub use reflector_state::ReflectorState;
pub use render_target::RenderTarget;
