//! Captions API relay library.
//!
//! Exposes a fixed set of POST routes and forwards each one to the matching
//! path of the upstream API with the configured `x-api-key` attached.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod upstream;

pub use config::RelayConfig;
pub use error::RelayError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
