//! authz core: transport-agnostic plugin protocol types, the plugin
//! capability trait, and the shared error type.
//!
//! This crate defines the wire-level contract between the container engine
//! and an authorization plugin. It carries no runtime or HTTP dependencies so
//! policies can be written and tested without a server.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Malformed wire input surfaces as `AuthzError::BadRequest`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod plugin;
pub mod protocol;

/// Shared result type.
pub use error::{AuthzError, Result};
pub use plugin::AuthzPlugin;
pub use protocol::authz::{AuthzRequest, Verdict};
