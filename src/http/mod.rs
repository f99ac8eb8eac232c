//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, route table registration)
//!     → request.rs (request ID, body classification)
//!     → upstream::Forwarder (single POST upstream)
//!     → response.rs (filter hop-by-hop headers)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{InboundBody, X_REQUEST_ID};
pub use response::{filter_headers, UpstreamResponse, EXCLUDED_HEADERS};
pub use server::{AppState, HttpServer};
