//! AuthZ wire payload vector tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::fs;

use authz_core::protocol::authz::{AuthzRequest, Verdict};

fn load(name: &str) -> Vec<u8> {
    fs::read(format!("tests/vectors/{name}")).unwrap()
}

#[test]
fn parse_request_full() {
    let req = AuthzRequest::from_json(&load("authz_req_full.json")).unwrap();
    assert_eq!(req.user, "alice");
    assert_eq!(req.user_authn_method, "TLS");
    assert_eq!(req.method, "POST");
    assert_eq!(req.uri, "/v1.43/containers/create?name=web");
    assert_eq!(req.body.as_deref(), Some(&b"{\"Image\":\"alpine\"}"[..]));
    assert_eq!(
        req.headers.get("Content-Type").map(String::as_str),
        Some("application/json")
    );
    assert_eq!(req.peer_certificates.len(), 1);
    assert!(req.peer_certificates[0].starts_with(b"-----BEGIN CERTIFICATE-----"));
    assert_eq!(req.response_status_code, 0);
    assert!(req.response_body.is_none());
}

#[test]
fn parse_response_phase() {
    let req = AuthzRequest::from_json(&load("authz_res.json")).unwrap();
    assert_eq!(req.method, "GET");
    assert!(req.body.is_none());
    assert_eq!(req.response_status_code, 200);
    assert_eq!(req.response_body.as_deref(), Some(&b"[{\"Id\":\"abc\"}]"[..]));
    assert_eq!(req.response_headers.len(), 1);
}

#[test]
fn nulls_are_absent() {
    let req = AuthzRequest::from_json(&load("authz_req_nulls.json")).unwrap();
    assert_eq!(req, AuthzRequest::new("DELETE", "/containers"));
}

#[test]
fn bad_base64_is_bad_request() {
    let err = AuthzRequest::from_json(&load("authz_req_bad_base64.json")).unwrap_err();
    assert_eq!(err.kind(), "bad_request");
}

#[test]
fn request_reencodes_to_same_payload() {
    let req = AuthzRequest::from_json(&load("authz_req_full.json")).unwrap();
    let json = serde_json::to_vec(&req).unwrap();
    assert_eq!(AuthzRequest::from_json(&json).unwrap(), req);
}

#[test]
fn verdict_decodes_engine_shape() {
    let v: Verdict = serde_json::from_str(r#"{"Allow":false,"Msg":"nope","Err":""}"#).unwrap();
    assert!(!v.allow);
    assert_eq!(v.msg, "nope");
    assert_eq!(v.err.as_deref(), Some(""));
}
