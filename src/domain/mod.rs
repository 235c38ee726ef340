//! Domain layer containing the session reflector's vocabulary.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, errors, observable cells, lifecycle enums)
//! - `session` - User and session records plus auth-state change events

pub mod foundation;
pub mod session;
