//! Policy layer.
//!
//! Holds the built-in decision rules served by the plugin. Policies are plain
//! `AuthzPlugin` implementations; the transport never looks inside them.

pub mod engine;

pub use engine::DefaultPolicy;
