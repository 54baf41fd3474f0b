//! Top-level facade crate for the authz plugin.
//!
//! Re-exports core types and the server library so users can depend on a
//! single crate when writing or serving their own `AuthzPlugin`.

pub mod core {
    pub use authz_core::*;
}

pub mod server {
    pub use authz_server::*;
}

pub use authz_core::{AuthzPlugin, AuthzRequest, Verdict};
