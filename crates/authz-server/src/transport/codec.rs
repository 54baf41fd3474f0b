//! Decode-once codec for plugin hook payloads.
//!
//! - Hook bodies => `AuthzRequest` (base64 byte fields decoded here)
//! - Replies => JSON with the plugin media type
//! - Failures => `{"Allow":false,"Err":"..."}` with the error's HTTP status

use axum::{
    body::Bytes,
    extract::rejection::BytesRejection,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use authz_core::{
    error::{AuthzError, Result},
    protocol::{
        authz::{AuthzRequest, Verdict},
        MEDIA_TYPE,
    },
};

pub fn decode(body: &Bytes) -> Result<AuthzRequest> {
    AuthzRequest::from_json(body)
}

/// Maps a body extraction failure (size limit, broken stream) onto the
/// shared error so it is reported like any other hook failure.
pub fn body_error(rejection: BytesRejection) -> AuthzError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AuthzError::PayloadTooLarge(rejection.body_text())
    } else {
        AuthzError::BadRequest(rejection.body_text())
    }
}

/// 200 reply carrying `value` as plugin JSON.
pub fn encode<T: Serialize>(value: &T) -> Response {
    match serde_json::to_vec(value) {
        Ok(body) => (StatusCode::OK, [(header::CONTENT_TYPE, MEDIA_TYPE)], body).into_response(),
        Err(e) => encode_error(&AuthzError::Internal(format!("encode failed: {e}"))),
    }
}

/// Error reply: a non-allowing verdict whose `Err` carries the failure.
pub fn encode_error(err: &AuthzError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = serde_json::to_vec(&Verdict::error(err.to_string())).unwrap_or_default();
    (status, [(header::CONTENT_TYPE, MEDIA_TYPE)], body).into_response()
}
