//! Axum router wiring.
//!
//! Plugin protocol routes (all POST) plus the operational endpoints on the
//! same listener.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use authz_core::protocol::{ACTIVATE_PATH, AUTHZ_REQUEST_PATH, AUTHZ_RESPONSE_PATH};

use crate::{app_state::AppState, ops, transport::handlers};

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.cfg().plugin.max_request_bytes;

    Router::new()
        .route(ACTIVATE_PATH, post(handlers::activate))
        .route(AUTHZ_REQUEST_PATH, post(handlers::authz_request))
        .route(AUTHZ_RESPONSE_PATH, post(handlers::authz_response))
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .route("/metrics", get(ops::metrics))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
