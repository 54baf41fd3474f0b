//! Dispatcher module exports.
//!
//! Re-exports the dispatcher so transport handlers can depend on this module
//! directly.

pub mod dispatcher;

pub use dispatcher::Dispatcher;
