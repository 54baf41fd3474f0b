//! Plugin protocol endpoints driven through the router.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use authz_core::protocol::MEDIA_TYPE;
use authz_server::{app_state::AppState, config, policy::DefaultPolicy, router};

fn app_with(cfg: config::PluginConfig) -> Router {
    router::build_router(AppState::new(cfg, Arc::new(DefaultPolicy::new())))
}

fn app() -> Router {
    app_with(config::PluginConfig::default())
}

async fn post(app: Router, path: &str, body: impl Into<Body>) -> (StatusCode, Option<String>, Vec<u8>) {
    let resp = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(path)
                .body(body.into())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = resp.status();
    let ct = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, ct, bytes.to_vec())
}

async fn verdict(method: &str, uri: &str) -> Value {
    let body = json!({ "RequestMethod": method, "RequestURI": uri }).to_string();
    let (status, ct, bytes) = post(app(), "/AuthZPlugin.AuthZReq", body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ct.as_deref(), Some(MEDIA_TYPE));
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn activate_declares_authz() {
    let (status, ct, bytes) = post(app(), "/Plugin.Activate", Body::empty()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ct.as_deref(), Some(MEDIA_TYPE));
    let v: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(v, json!({ "Implements": ["authz"] }));
}

#[tokio::test]
async fn scenario_verdicts() {
    assert_eq!(
        verdict("DELETE", "/containers").await,
        json!({ "Allow": false, "Msg": "Deleting containers is not allowed" })
    );
    assert_eq!(
        verdict("DELETE", "/containers/1234").await,
        json!({ "Allow": true, "Msg": "Request approved" })
    );
    assert_eq!(
        verdict("GET", "/images/json").await,
        json!({ "Allow": true, "Msg": "GET requests are allowed" })
    );
    assert_eq!(
        verdict("POST", "/containers/create").await,
        json!({ "Allow": true, "Msg": "Request approved" })
    );
}

#[tokio::test]
async fn response_hook_allows_without_msg() {
    let body = json!({
        "RequestMethod": "DELETE",
        "RequestURI": "/containers",
        "ResponseStatusCode": 204,
        "ResponseBody": null,
    })
    .to_string();
    let (status, _, bytes) = post(app(), "/AuthZPlugin.AuthZRes", body).await;
    assert_eq!(status, StatusCode::OK);
    let v: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(v, json!({ "Allow": true }));
}

#[tokio::test]
async fn malformed_body_is_400_with_err() {
    let (status, ct, bytes) = post(app(), "/AuthZPlugin.AuthZReq", "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(ct.as_deref(), Some(MEDIA_TYPE));
    let v: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(v["Err"].as_str().unwrap().contains("invalid authz request"));
    assert_eq!(v["Allow"], json!(false));
}

#[tokio::test]
async fn empty_body_is_400() {
    let (status, _, _) = post(app(), "/AuthZPlugin.AuthZRes", Body::empty()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn oversized_body_is_413() {
    let cfg = config::load_from_str("version: 1\nplugin:\n  max_request_bytes: 1024\n").unwrap();
    let padding = "x".repeat(4096);
    let body = json!({ "RequestMethod": "GET", "RequestURI": padding }).to_string();
    let state = AppState::new(cfg, Arc::new(DefaultPolicy::new()));
    let (status, ct, bytes) =
        post(router::build_router(state.clone()), "/AuthZPlugin.AuthZReq", body).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(ct.as_deref(), Some(MEDIA_TYPE));

    let v: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(v["Allow"], json!(false));
    assert!(v["Err"].as_str().unwrap().starts_with("payload too large"));
    assert_eq!(state.metrics().decode_errors.get(&[("phase", "request")]), 1);
}

#[tokio::test]
async fn get_on_hook_is_rejected() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/AuthZPlugin.AuthZReq")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn metrics_reflect_verdicts() {
    let state = AppState::new(config::PluginConfig::default(), Arc::new(DefaultPolicy::new()));
    let app = router::build_router(state.clone());

    let body = json!({ "RequestMethod": "DELETE", "RequestURI": "/containers" }).to_string();
    post(app.clone(), "/AuthZPlugin.AuthZReq", body).await;
    post(app.clone(), "/AuthZPlugin.AuthZReq", "garbage").await;

    let resp = app
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let text = String::from_utf8(
        axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec(),
    )
    .unwrap();
    assert!(text.contains("authz_verdicts_total{allow=\"false\",phase=\"request\"} 1"));
    assert!(text.contains("authz_decode_errors_total{phase=\"request\"} 1"));
}

#[tokio::test]
async fn readyz_flips_when_draining() {
    let state = AppState::new(config::PluginConfig::default(), Arc::new(DefaultPolicy::new()));
    let app = router::build_router(state.clone());

    let get = |app: Router| async move {
        app.oneshot(Request::builder().uri("/readyz").body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    };
    assert_eq!(get(app.clone()).await, StatusCode::OK);
    state.metrics().set_draining();
    assert_eq!(get(app).await, StatusCode::SERVICE_UNAVAILABLE);
}
