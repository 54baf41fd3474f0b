//! Plugin wire protocol (Docker plugin API v1.2).
//!
//! The engine talks to the plugin with JSON over HTTP POST. Three endpoints
//! matter for an authorization plugin:
//! - `/Plugin.Activate`: handshake, answered with the implemented subsystems.
//! - `/AuthZPlugin.AuthZReq`: pre-call hook.
//! - `/AuthZPlugin.AuthZRes`: post-call hook.
//!
//! Byte fields travel as base64 strings. Decoding is panic-free: malformed
//! payloads are reported as `AuthzError::BadRequest`.

pub mod activate;
pub mod authz;

/// Content type the engine expects on every plugin reply.
pub const MEDIA_TYPE: &str = "application/vnd.docker.plugins.v1.2+json";

/// Subsystem name declared during activation.
pub const AUTHZ_SUBSYSTEM: &str = "authz";

pub const ACTIVATE_PATH: &str = "/Plugin.Activate";
pub const AUTHZ_REQUEST_PATH: &str = "/AuthZPlugin.AuthZReq";
pub const AUTHZ_RESPONSE_PATH: &str = "/AuthZPlugin.AuthZRes";
