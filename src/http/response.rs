//! Response relay.
//!
//! # Responsibilities
//! - Carry the upstream status, headers and body back to the caller
//! - Strip the framing headers that belong to the upstream connection
//!
//! # Design Decisions
//! - Body is buffered in full, then sent; the server sets its own framing
//! - Header order and repeated values (e.g. `set-cookie`) are preserved
//! - Nothing else is added or rewritten

use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, HeaderName, StatusCode};
use axum::response::{IntoResponse, Response};

/// Headers dropped from every relayed response.
pub const EXCLUDED_HEADERS: [&str; 4] = [
    "content-encoding",
    "content-length",
    "transfer-encoding",
    "connection",
];

/// Returns true if the header must not be relayed.
///
/// `HeaderName` is always lowercase, so this is case-insensitive.
pub fn is_excluded(name: &HeaderName) -> bool {
    EXCLUDED_HEADERS.contains(&name.as_str())
}

/// Copy `headers`, skipping the excluded ones.
pub fn filter_headers(headers: &HeaderMap) -> HeaderMap {
    let mut out = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers.iter() {
        if !is_excluded(name) {
            out.append(name.clone(), value.clone());
        }
    }
    out
}

/// A fully read upstream response, ready to hand back to the caller.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl UpstreamResponse {
    /// Build from raw upstream parts, dropping the excluded headers.
    pub fn new(status: StatusCode, headers: &HeaderMap, body: Bytes) -> Self {
        Self {
            status,
            headers: filter_headers(headers),
            body,
        }
    }
}

impl IntoResponse for UpstreamResponse {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}
