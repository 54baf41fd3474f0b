//! Transport layer (plugin HTTP over unix socket or TCP).
//!
//! Binds the endpoint the engine connects to, decodes hook payloads once,
//! and hands them to the dispatcher.

pub mod codec;
pub mod handlers;
pub mod listener;
pub mod serve;

pub use listener::PluginListener;
pub use serve::serve;
