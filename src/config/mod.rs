//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! .env file (fills unset environment variables)
//!     → built-in defaults
//!     → loader.rs (optional TOML file)
//!     → loader.rs (CLI / environment overrides)
//!     → validation.rs (semantic checks)
//!     → RelayConfig (validated, immutable)
//!     → shared via Arc with the forwarder
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_env_file, ConfigError, Overrides};
pub use schema::{ListenerConfig, LogFormat, ObservabilityConfig, RelayConfig, UpstreamConfig};
