//! Shared error type across authz crates.

use std::path::PathBuf;

use thiserror::Error;

/// Shared result type.
pub type Result<T> = std::result::Result<T, AuthzError>;

/// Unified error type used by core and server.
///
/// Policy evaluation itself is total and never produces one of these; they
/// come from the wire codec, configuration, and listener setup.
#[derive(Debug, Error)]
pub enum AuthzError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("payload too large: {0}")]
    PayloadTooLarge(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("unsupported config version: {0}")]
    UnsupportedVersion(u32),
    #[error("bind {target} failed: {source}")]
    Bind {
        target: String,
        #[source]
        source: std::io::Error,
    },
    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("internal: {0}")]
    Internal(String),
}

impl AuthzError {
    pub fn bind(target: impl Into<String>, source: std::io::Error) -> Self {
        AuthzError::Bind {
            target: target.into(),
            source,
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AuthzError::Io {
            path: path.into(),
            source,
        }
    }

    /// HTTP status used when this error is reported to the engine.
    pub fn status_code(&self) -> u16 {
        match self {
            AuthzError::BadRequest(_) => 400,
            AuthzError::PayloadTooLarge(_) => 413,
            _ => 500,
        }
    }

    /// Stable label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            AuthzError::BadRequest(_) => "bad_request",
            AuthzError::PayloadTooLarge(_) => "payload_too_large",
            AuthzError::InvalidConfig(_) => "invalid_config",
            AuthzError::UnsupportedVersion(_) => "unsupported_version",
            AuthzError::Bind { .. } => "bind",
            AuthzError::Io { .. } => "io",
            AuthzError::Internal(_) => "internal",
        }
    }
}
