//! Plugin capability surface.
//!
//! The engine consults an authorization plugin at two hook points: before it
//! executes an API call and after. Any type implementing [`AuthzPlugin`] can be
//! served.

use crate::protocol::authz::{AuthzRequest, Verdict};

/// Two-hook authorization capability.
///
/// Both hooks are synchronous and must be total: every call returns exactly
/// one verdict and never blocks. Implementations are shared across
/// connections behind an `Arc`, hence `Send + Sync`.
pub trait AuthzPlugin: Send + Sync {
    /// Pre-call hook (`AuthZPlugin.AuthZReq`).
    fn evaluate_request(&self, req: &AuthzRequest) -> Verdict;

    /// Post-call hook (`AuthZPlugin.AuthZRes`). `req` carries the response
    /// fields filled in by the engine.
    fn evaluate_response(&self, req: &AuthzRequest) -> Verdict;
}

/// Hook point a verdict is produced for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Request,
    Response,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Request => "request",
            Phase::Response => "response",
        }
    }

    /// Run the hook for this phase.
    pub fn evaluate(self, plugin: &dyn AuthzPlugin, req: &AuthzRequest) -> Verdict {
        match self {
            Phase::Request => plugin.evaluate_request(req),
            Phase::Response => plugin.evaluate_response(req),
        }
    }
}
