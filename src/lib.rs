//! Session Reflector - Reactive view of an auth provider's session
//!
//! This crate mirrors the current user and a loading flag from an external
//! authentication provider into observable cells that UI code binds to.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
