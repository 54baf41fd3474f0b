//! Shared application state for the authz plugin server.
//!
//! Built once in `main` and handed to the router; there is no process-wide
//! singleton. The plugin handle is injected so any `AuthzPlugin` can be
//! served.

use std::sync::Arc;

use authz_core::plugin::AuthzPlugin;

use crate::config::PluginConfig;
use crate::dispatch::Dispatcher;
use crate::obs::PluginMetrics;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    dispatcher: Arc<Dispatcher>,
    metrics: Arc<PluginMetrics>,
}

struct AppStateInner {
    cfg: PluginConfig,
}

impl AppState {
    pub fn new(cfg: PluginConfig, plugin: Arc<dyn AuthzPlugin>) -> Self {
        let metrics = Arc::new(PluginMetrics::default());
        let dispatcher = Dispatcher::new(plugin, Arc::clone(&metrics));

        Self {
            inner: Arc::new(AppStateInner { cfg }),
            dispatcher: Arc::new(dispatcher),
            metrics,
        }
    }

    pub fn cfg(&self) -> &PluginConfig {
        &self.inner.cfg
    }

    pub fn dispatcher(&self) -> Arc<Dispatcher> {
        Arc::clone(&self.dispatcher)
    }

    pub fn metrics(&self) -> Arc<PluginMetrics> {
        Arc::clone(&self.metrics)
    }

    pub fn is_draining(&self) -> bool {
        self.metrics.is_draining()
    }
}
