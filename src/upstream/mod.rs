//! Upstream API subsystem.
//!
//! # Data Flow
//! ```text
//! RouteBinding.upstream + InboundBody
//!     → client.rs (build URL, inject x-api-key, POST once)
//!     → http/response.rs (filter headers)
//!     → UpstreamResponse or RelayError
//! ```
//!
//! # Design Decisions
//! - One pooled client for the process lifetime
//! - Exactly one outbound call per inbound request, no retries
//! - Non-2xx statuses are data, not errors

pub mod client;

pub use client::{ClientBuildError, Forwarder, X_API_KEY};
