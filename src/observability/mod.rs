//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging through `tracing`; JSON for machine parsing
//! - Request ID lives in the request span, not in upstream traffic
//! - The API key never appears in log output

pub mod logging;

pub use logging::init_logging;
