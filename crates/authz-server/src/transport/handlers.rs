//! Plugin protocol handlers.
//!
//! Every hook is a POST with a JSON body. A verdict, deny included, is
//! always a 200; only undecodable or oversized input produces an error
//! status, and that reply is still a plugin-typed `Err` verdict.

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    response::Response,
};

use authz_core::plugin::Phase;
use authz_core::protocol::activate::Manifest;

use crate::app_state::AppState;
use crate::transport::codec::{body_error, decode, encode, encode_error};

pub async fn activate(State(app): State<AppState>) -> Response {
    tracing::info!(name = %app.cfg().plugin.name, "plugin activated by engine");
    encode(&Manifest::authz())
}

pub async fn authz_request(
    State(app): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    evaluate(&app, Phase::Request, body)
}

pub async fn authz_response(
    State(app): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    evaluate(&app, Phase::Response, body)
}

fn evaluate(app: &AppState, phase: Phase, body: Result<Bytes, BytesRejection>) -> Response {
    match body.map_err(body_error).and_then(|b| decode(&b)) {
        Ok(req) => encode(&app.dispatcher().dispatch(phase, &req)),
        Err(e) => {
            tracing::warn!(phase = phase.as_str(), error = %e, "undecodable hook payload");
            app.metrics()
                .decode_errors
                .inc(&[("phase", phase.as_str())]);
            encode_error(&e)
        }
    }
}
