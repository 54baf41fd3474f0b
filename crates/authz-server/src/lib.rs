//! authz plugin server library entry.
//!
//! Wires config, the policy dispatcher, the plugin protocol handlers and the
//! socket transport into a servable plugin. Consumed by the binary
//! (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod dispatch;
pub mod obs;
pub mod ops;
pub mod policy;
pub mod router;
pub mod transport;
