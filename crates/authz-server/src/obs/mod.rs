//! Lightweight in-process metrics.
//!
//! Verdict counts, evaluation latency, decode failures and open connections
//! are stored as atomics and rendered by the `/metrics` handler.

pub mod metrics;

pub use metrics::PluginMetrics;
