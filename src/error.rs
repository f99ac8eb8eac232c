use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Failures of the forwarding path. Upstream HTTP error statuses are not
/// errors; they are relayed as-is.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("upstream request failed: {0}")]
    Upstream(String),

    #[error("upstream request timed out: {0}")]
    Timeout(String),

    #[error("failed to read upstream response: {0}")]
    ReadBody(String),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    detail: String,
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::Upstream(_) | RelayError::ReadBody(_) => StatusCode::BAD_GATEWAY,
            RelayError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    fn summary(&self) -> &'static str {
        match self {
            RelayError::Upstream(_) => "upstream request failed",
            RelayError::Timeout(_) => "upstream request timed out",
            RelayError::ReadBody(_) => "failed to read upstream response",
        }
    }

    fn detail(&self) -> &str {
        match self {
            RelayError::Upstream(d) | RelayError::Timeout(d) | RelayError::ReadBody(d) => d.as_str(),
        }
    }

    /// Classify a send failure from the upstream client.
    pub fn from_send(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RelayError::Timeout(err.to_string())
        } else {
            RelayError::Upstream(err.to_string())
        }
    }

    /// Classify a failure while reading the upstream body.
    pub fn from_read(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RelayError::Timeout(err.to_string())
        } else {
            RelayError::ReadBody(err.to_string())
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.summary(),
            detail: self.detail().to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

pub type RelayResult<T> = Result<T, RelayError>;
