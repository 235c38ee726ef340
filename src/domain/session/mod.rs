//! Session domain module.
//!
//! Provider-agnostic view of the auth provider's session state: the `User`
//! and `Session` records the front-end mirrors, and the `AuthChangeEvent`
//! kinds that accompany change notifications.

mod events;
mod record;
mod user;

pub use events::AuthChangeEvent;
pub use record::{user_of, Session};
pub use user::User;
