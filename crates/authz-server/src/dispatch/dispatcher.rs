use std::sync::Arc;
use std::time::Instant;

use authz_core::plugin::{AuthzPlugin, Phase};
use authz_core::protocol::authz::{AuthzRequest, Verdict};

use crate::obs::PluginMetrics;

/// Routes hook invocations to the served plugin.
///
/// Owns the plugin handle; there is exactly one per process, built at
/// startup and shared through `AppState`.
pub struct Dispatcher {
    plugin: Arc<dyn AuthzPlugin>,
    metrics: Arc<PluginMetrics>,
}

impl Dispatcher {
    pub fn new(plugin: Arc<dyn AuthzPlugin>, metrics: Arc<PluginMetrics>) -> Self {
        Self { plugin, metrics }
    }

    /// Evaluate `req` at `phase`, recording latency and the outcome.
    pub fn dispatch(&self, phase: Phase, req: &AuthzRequest) -> Verdict {
        let started = Instant::now();
        let verdict = phase.evaluate(self.plugin.as_ref(), req);
        let elapsed = started.elapsed();

        let allow = if verdict.allow { "true" } else { "false" };
        self.metrics
            .verdicts
            .inc(&[("phase", phase.as_str()), ("allow", allow)]);
        self.metrics
            .evaluation_duration
            .observe(&[("phase", phase.as_str())], elapsed);

        if verdict.allow {
            tracing::debug!(
                phase = phase.as_str(),
                method = %req.method,
                uri = %req.uri,
                user = %req.user,
                msg = %verdict.msg,
                "allowed"
            );
        } else {
            tracing::info!(
                phase = phase.as_str(),
                method = %req.method,
                uri = %req.uri,
                user = %req.user,
                msg = %verdict.msg,
                "denied"
            );
        }

        verdict
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::DefaultPolicy;

    #[test]
    fn dispatch_counts_by_phase_and_outcome() {
        let metrics = Arc::new(PluginMetrics::default());
        let d = Dispatcher::new(Arc::new(DefaultPolicy), Arc::clone(&metrics));

        let denied = d.dispatch(Phase::Request, &AuthzRequest::new("DELETE", "/containers"));
        assert!(!denied.allow);
        let passed = d.dispatch(Phase::Response, &AuthzRequest::new("DELETE", "/containers"));
        assert!(passed.allow);

        assert_eq!(metrics.verdicts.get(&[("phase", "request"), ("allow", "false")]), 1);
        assert_eq!(metrics.verdicts.get(&[("phase", "response"), ("allow", "true")]), 1);
        assert_eq!(metrics.evaluation_duration.count(&[("phase", "request")]), 1);
    }
}
