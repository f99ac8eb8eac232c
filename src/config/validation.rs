//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, body limit > 0)
//! - Check the bind address and upstream URL parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RelayConfig → Result<(), Vec<ValidationError>>
//! - A missing API key is not an error; the upstream rejects the call instead

use std::net::SocketAddr;

use axum::http::HeaderValue;
use thiserror::Error;
use url::Url;

use crate::config::schema::RelayConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a valid socket address")]
    BindAddress(String),

    #[error("listener.max_body_bytes must be greater than 0")]
    ZeroBodyLimit,

    #[error("upstream.base_url '{url}' is invalid: {reason}")]
    BaseUrl { url: String, reason: String },

    #[error("upstream.api_key contains characters not allowed in an HTTP header")]
    ApiKey,

    #[error("upstream.{0} must be greater than 0")]
    ZeroTimeout(&'static str),
}

/// Validate a merged configuration.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    if config.listener.max_body_bytes == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    let base_url = &config.upstream.base_url;
    match Url::parse(base_url) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => errors.push(ValidationError::BaseUrl {
            url: base_url.clone(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        }),
        Err(e) => errors.push(ValidationError::BaseUrl {
            url: base_url.clone(),
            reason: e.to_string(),
        }),
    }

    if HeaderValue::from_str(&config.upstream.api_key).is_err() {
        errors.push(ValidationError::ApiKey);
    }

    if config.upstream.timeout_secs == Some(0) {
        errors.push(ValidationError::ZeroTimeout("timeout_secs"));
    }
    if config.upstream.connect_timeout_secs == Some(0) {
        errors.push(ValidationError::ZeroTimeout("connect_timeout_secs"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&RelayConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = RelayConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.listener.max_body_bytes = 0;
        config.upstream.base_url = "ftp://example.com/api".into();
        config.upstream.timeout_secs = Some(0);

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert_eq!(errors[0], ValidationError::BindAddress("not-an-address".into()));
        assert_eq!(errors[1], ValidationError::ZeroBodyLimit);
        assert!(matches!(errors[2], ValidationError::BaseUrl { .. }));
        assert_eq!(errors[3], ValidationError::ZeroTimeout("timeout_secs"));
    }

    #[test]
    fn test_relative_base_url_rejected() {
        let mut config = RelayConfig::default();
        config.upstream.base_url = "/api".into();
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(errors[0], ValidationError::BaseUrl { .. }));
    }

    #[test]
    fn test_api_key_with_newline_rejected() {
        let mut config = RelayConfig::default();
        config.upstream.api_key = "abc\r\nx-evil: 1".into();
        assert_eq!(validate_config(&config).unwrap_err(), vec![ValidationError::ApiKey]);
    }

    #[test]
    fn test_empty_api_key_allowed() {
        let mut config = RelayConfig::default();
        config.upstream.api_key.clear();
        assert!(validate_config(&config).is_ok());
    }
}
