//! Forwarding client for the upstream API.

use std::time::{Duration, Instant};

use axum::http::header::{self, HeaderValue};
use reqwest::Client;
use thiserror::Error;

use crate::config::UpstreamConfig;
use crate::error::{RelayError, RelayResult};
use crate::http::request::InboundBody;
use crate::http::response::UpstreamResponse;

/// Header carrying the static credential.
pub const X_API_KEY: &str = "x-api-key";

/// Errors raised while constructing the forwarder at startup.
#[derive(Debug, Error)]
pub enum ClientBuildError {
    #[error("api key is not a valid header value")]
    InvalidApiKey,

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Relays one inbound request to the upstream API.
///
/// Holds the immutable pieces shared by every request: the pooled client,
/// the normalized base URL and the credential header.
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: Client,
    base_url: String,
    api_key: HeaderValue,
}

impl Forwarder {
    /// Build a forwarder from validated configuration.
    pub fn new(config: &UpstreamConfig) -> Result<Self, ClientBuildError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = config.connect_timeout_secs {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }

        let mut api_key = HeaderValue::from_str(&config.api_key)
            .map_err(|_| ClientBuildError::InvalidApiKey)?;
        api_key.set_sensitive(true);

        Ok(Self {
            client: builder.build()?,
            base_url: config.normalized_base_url().to_string(),
            api_key,
        })
    }

    /// Full upstream URL for a route suffix: `{base}/{upstream_path}`.
    pub fn url_for(&self, upstream_path: &str) -> String {
        format!("{}/{}", self.base_url, upstream_path.trim_start_matches('/'))
    }

    /// POST `body` to `upstream_path` and read the whole response.
    pub async fn forward(&self, upstream_path: &str, body: InboundBody) -> RelayResult<UpstreamResponse> {
        let url = self.url_for(upstream_path);
        let substituted = body.is_empty();
        let started = Instant::now();

        let response = self
            .client
            .post(&url)
            .header(X_API_KEY, self.api_key.clone())
            .header(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(body.into_upstream_body())
            .send()
            .await
            .map_err(|e| {
                tracing::error!(upstream = %url, error = %e, "Upstream error");
                RelayError::from_send(e)
            })?;

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.bytes().await.map_err(|e| {
            tracing::error!(upstream = %url, status = %status, error = %e, "Failed reading upstream body");
            RelayError::from_read(e)
        })?;

        tracing::debug!(
            upstream = %url,
            status = status.as_u16(),
            empty_body_substituted = substituted,
            response_bytes = bytes.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Relayed request"
        );

        Ok(UpstreamResponse::new(status, &headers, bytes))
    }
}
