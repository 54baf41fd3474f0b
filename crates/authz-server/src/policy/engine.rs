use authz_core::plugin::AuthzPlugin;
use authz_core::protocol::authz::{AuthzRequest, Verdict};

pub const DENY_CONTAINER_DELETE_MSG: &str = "Deleting containers is not allowed";
pub const ALLOW_GET_MSG: &str = "GET requests are allowed";
pub const ALLOW_DEFAULT_MSG: &str = "Request approved";

/// Built-in policy: refuse `DELETE /containers`, approve everything else.
///
/// Rules are checked in order, first match wins:
/// 1. `DELETE` on exactly `/containers` is denied.
/// 2. Any `GET` is allowed.
/// 3. Everything else is allowed.
///
/// Method and URI comparisons are exact and case-sensitive. A container id
/// (`/containers/abc`), an API version prefix, or a query string all miss
/// rule 1 and fall through to the default.
///
/// Stateless; one instance can serve every connection.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultPolicy;

impl DefaultPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl AuthzPlugin for DefaultPolicy {
    fn evaluate_request(&self, req: &AuthzRequest) -> Verdict {
        if req.method == "DELETE" && req.uri == "/containers" {
            return Verdict::deny(DENY_CONTAINER_DELETE_MSG);
        }

        if req.method == "GET" {
            return Verdict::allow(ALLOW_GET_MSG);
        }

        Verdict::allow(ALLOW_DEFAULT_MSG)
    }

    fn evaluate_response(&self, _req: &AuthzRequest) -> Verdict {
        Verdict::allow("")
    }
}
