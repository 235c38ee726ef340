//! Application layer - orchestrates ports into the session reflector.
//!
//! `SessionReflector` is the application-level context object: it owns the
//! observable session cells and the auth-state subscription, and drives the
//! initialize/teardown lifecycle against an `AuthProvider`.

mod session_reflector;

pub use session_reflector::{InitOutcome, ReflectorError, SessionReflector};
