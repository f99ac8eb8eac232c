//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation (at startup):
//!     ROUTES (static table)
//!     → http/server.rs registers one POST handler per binding
//!     → Freeze as immutable axum Router
//!
//! Incoming Request:
//!     axum path match → RouteBinding → forwarder
//! ```
//!
//! # Design Decisions
//! - Routes compiled in, immutable at runtime
//! - External path equals upstream path plus a leading slash
//! - Anything not in the table is a 404 and never reaches the upstream

pub mod table;

pub use table::{find_route, RouteBinding, ROUTES};
