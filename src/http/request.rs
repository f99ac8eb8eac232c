//! Inbound request handling.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) for tracing
//! - Decide what body is sent upstream
//!
//! # Design Decisions
//! - A body that is valid JSON is forwarded byte-for-byte, never re-serialized
//! - Only `application/json` and `application/*+json` bodies are read
//! - A missing, unparsable or falsy body (`null`, `false`, `0`, `""`, `[]`, `{}`)
//!   becomes `{}`; it is never rejected
//! - The request ID stays local: it is not sent upstream

use axum::body::Bytes;
use axum::http::{HeaderName, HeaderValue, Request};
use serde_json::Value;
use tower_http::request_id::{MakeRequestId, RequestId, SetRequestIdLayer};
use uuid::Uuid;

pub const X_REQUEST_ID: &str = "x-request-id";

/// Body sent upstream when the caller's body is absent or not JSON.
pub const EMPTY_OBJECT: &[u8] = b"{}";

/// The caller's body as seen by the forwarder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundBody {
    /// Valid JSON, kept as the original bytes.
    Json(Bytes),
    /// Nothing usable was sent.
    Empty,
}

impl InboundBody {
    /// Classify raw request bytes given the inbound `Content-Type`.
    pub fn from_bytes(content_type: Option<&HeaderValue>, bytes: Bytes) -> Self {
        if !content_type.is_some_and(is_json_content_type) {
            return InboundBody::Empty;
        }

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(value) if is_truthy(&value) => InboundBody::Json(bytes),
            _ => InboundBody::Empty,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, InboundBody::Empty)
    }

    /// Bytes to send as the upstream request body.
    pub fn into_upstream_body(self) -> Bytes {
        match self {
            InboundBody::Json(bytes) => bytes,
            InboundBody::Empty => Bytes::from_static(EMPTY_OBJECT),
        }
    }
}

/// `application/json` or any `application/*+json` type, parameters ignored.
pub fn is_json_content_type(value: &HeaderValue) -> bool {
    let Ok(value) = value.to_str() else {
        return false;
    };
    let mime = value.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

/// Empty containers, empty strings, zero, `false` and `null` count as no body.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Produces UUID v4 request IDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV4;

impl MakeRequestId for MakeRequestUuidV4 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Layer that tags each inbound request with `x-request-id` unless the caller set one.
pub fn request_id_layer() -> SetRequestIdLayer<MakeRequestUuidV4> {
    SetRequestIdLayer::new(HeaderName::from_static(X_REQUEST_ID), MakeRequestUuidV4)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(content_type: &'static str, raw: &[u8]) -> InboundBody {
        let value = HeaderValue::from_static(content_type);
        InboundBody::from_bytes(Some(&value), Bytes::copy_from_slice(raw))
    }

    #[test]
    fn test_valid_json_kept_verbatim() {
        let raw = Bytes::from_static(b"{ \"page\" : 2,  \"z\":1, \"a\":0 }");
        let json = HeaderValue::from_static("application/json");
        let body = InboundBody::from_bytes(Some(&json), raw.clone());
        assert_eq!(body, InboundBody::Json(raw.clone()));
        assert_eq!(body.into_upstream_body(), raw);
    }

    #[test]
    fn test_truthy_non_object_json_is_forwarded() {
        for raw in [&b"[1,2]"[..], b"\"text\"", b"42", b"-0.5", b"true"] {
            let body = classify("application/json", raw);
            assert_eq!(body.into_upstream_body().as_ref(), raw);
        }
    }

    #[test]
    fn test_falsy_json_becomes_empty_object() {
        for raw in [&b"null"[..], b"false", b"0", b"0.0", b"\"\"", b"[]", b"{ }"] {
            let body = classify("application/json", raw);
            assert!(body.is_empty(), "{:?}", raw);
            assert_eq!(body.into_upstream_body().as_ref(), b"{}");
        }
    }

    #[test]
    fn test_missing_or_invalid_becomes_empty_object() {
        for raw in [&b""[..], b"   ", b"{\"page\":", b"page=2", b"{} {}"] {
            let body = classify("application/json", raw);
            assert!(body.is_empty(), "{:?}", raw);
            assert_eq!(body.into_upstream_body().as_ref(), b"{}");
        }
    }

    #[test]
    fn test_non_json_content_type_ignores_body() {
        assert!(classify("text/plain", b"{\"a\":1}").is_empty());
        assert!(classify("application/x-www-form-urlencoded", b"{\"a\":1}").is_empty());
        assert!(InboundBody::from_bytes(None, Bytes::from_static(b"{\"a\":1}")).is_empty());
    }

    #[test]
    fn test_json_content_type_variants() {
        assert!(!classify("application/json; charset=utf-8", b"{\"a\":1}").is_empty());
        assert!(!classify("Application/JSON", b"{\"a\":1}").is_empty());
        assert!(!classify("application/merge-patch+json", b"{\"a\":1}").is_empty());
        assert!(classify("text/json", b"{\"a\":1}").is_empty());
    }

    #[test]
    fn test_request_ids_are_unique_uuids() {
        let req = Request::builder().body(()).unwrap();
        let mut maker = MakeRequestUuidV4;
        let a = maker.make_request_id(&req).unwrap();
        let b = maker.make_request_id(&req).unwrap();

        let a = a.header_value().to_str().unwrap();
        assert!(Uuid::parse_str(a).is_ok());
        assert_ne!(a, b.header_value().to_str().unwrap());
    }
}
