//! Authorization request/response payloads.
//!
//! The engine sends the same request shape to both hooks; the `Response*`
//! fields are only populated for the post-call hook. Apart from method and
//! URI, every field may be absent or `null`.

use std::collections::BTreeMap;

use bytes::Bytes;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{AuthzError, Result};

/// One intercepted engine API call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthzRequest {
    /// Authenticated user, empty when the engine runs without TLS auth.
    #[serde(rename = "User", default, deserialize_with = "null_default")]
    pub user: String,
    #[serde(rename = "UserAuthNMethod", default, deserialize_with = "null_default")]
    pub user_authn_method: String,

    #[serde(rename = "RequestMethod", default, deserialize_with = "null_default")]
    pub method: String,
    /// Request path, including any query component.
    #[serde(rename = "RequestURI", default, deserialize_with = "null_default")]
    pub uri: String,
    #[serde(
        rename = "RequestBody",
        default,
        with = "base64_bytes",
        skip_serializing_if = "Option::is_none"
    )]
    pub body: Option<Bytes>,
    #[serde(rename = "RequestHeaders", default, deserialize_with = "null_default")]
    pub headers: BTreeMap<String, String>,
    /// PEM-encoded client certificates.
    #[serde(
        rename = "RequestPeerCertificates",
        default,
        with = "base64_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub peer_certificates: Vec<Bytes>,

    #[serde(rename = "ResponseStatusCode", default, deserialize_with = "null_default")]
    pub response_status_code: i32,
    #[serde(
        rename = "ResponseBody",
        default,
        with = "base64_bytes",
        skip_serializing_if = "Option::is_none"
    )]
    pub response_body: Option<Bytes>,
    #[serde(rename = "ResponseHeaders", default, deserialize_with = "null_default")]
    pub response_headers: BTreeMap<String, String>,
}

impl AuthzRequest {
    /// Request with only method and URI set.
    pub fn new(method: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            uri: uri.into(),
            ..Self::default()
        }
    }

    /// Decode a hook payload. An empty body is rejected.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes)
            .map_err(|e| AuthzError::BadRequest(format!("invalid authz request: {e}")))
    }
}

/// Decision for one hook invocation (wire name: `Response`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    #[serde(rename = "Allow")]
    pub allow: bool,
    #[serde(rename = "Msg", default, skip_serializing_if = "String::is_empty")]
    pub msg: String,
    /// Plugin-side failure. Never set by a policy.
    #[serde(rename = "Err", default, skip_serializing_if = "Option::is_none")]
    pub err: Option<String>,
}

impl Verdict {
    pub fn allow(msg: impl Into<String>) -> Self {
        Self {
            allow: true,
            msg: msg.into(),
            err: None,
        }
    }

    pub fn deny(msg: impl Into<String>) -> Self {
        Self {
            allow: false,
            msg: msg.into(),
            err: None,
        }
    }

    /// Failure verdict: not allowed, carrying `err`.
    pub fn error(err: impl Into<String>) -> Self {
        Self {
            allow: false,
            msg: String::new(),
            err: Some(err.into()),
        }
    }
}

fn null_default<'de, D, T>(d: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

mod base64_bytes {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use bytes::Bytes;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(v: &Option<Bytes>, s: S) -> Result<S::Ok, S::Error> {
        match v {
            Some(b) => s.serialize_str(&STANDARD.encode(b)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Bytes>, D::Error> {
        match Option::<String>::deserialize(d)? {
            None => Ok(None),
            Some(s) => STANDARD
                .decode(s.as_bytes())
                .map(|v| Some(Bytes::from(v)))
                .map_err(de::Error::custom),
        }
    }
}

mod base64_list {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use bytes::Bytes;
    use serde::{de, ser::SerializeSeq, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(v: &[Bytes], s: S) -> Result<S::Ok, S::Error> {
        let mut seq = s.serialize_seq(Some(v.len()))?;
        for b in v {
            seq.serialize_element(&STANDARD.encode(b))?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Bytes>, D::Error> {
        Option::<Vec<String>>::deserialize(d)?
            .unwrap_or_default()
            .into_iter()
            .map(|s| {
                STANDARD
                    .decode(s.as_bytes())
                    .map(Bytes::from)
                    .map_err(de::Error::custom)
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn msg_and_err_omitted_when_empty() {
        let json = serde_json::to_string(&Verdict::allow("")).unwrap();
        assert_eq!(json, r#"{"Allow":true}"#);

        let json = serde_json::to_string(&Verdict::deny("no")).unwrap();
        assert_eq!(json, r#"{"Allow":false,"Msg":"no"}"#);
    }

    #[test]
    fn error_verdict_is_not_allowed() {
        let v = Verdict::error("boom");
        assert!(!v.allow);
        assert_eq!(v.err.as_deref(), Some("boom"));
    }

    #[test]
    fn empty_body_rejected() {
        let err = AuthzRequest::from_json(b"").unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn empty_object_uses_zero_values() {
        let req = AuthzRequest::from_json(b"{}").unwrap();
        assert_eq!(req, AuthzRequest::default());
    }
}
