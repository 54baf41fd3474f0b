//! Activation handshake payload.

use serde::{Deserialize, Serialize};

use super::AUTHZ_SUBSYSTEM;

/// Reply to `/Plugin.Activate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(rename = "Implements")]
    pub implements: Vec<String>,
}

impl Manifest {
    /// Manifest of a plugin implementing only the authorization subsystem.
    pub fn authz() -> Self {
        Self {
            implements: vec![AUTHZ_SUBSYSTEM.to_string()],
        }
    }
}
