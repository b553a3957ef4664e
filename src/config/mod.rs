//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! built-in defaults (incl. the F1 route table)
//!     → loader.rs (optional TOML file, then F1_PROXY_* env overrides)
//!     → validation.rs (semantic checks, all errors collected)
//!     → ProxyConfig (validated, immutable)
//!     → consumed once by HttpServer::new
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no hot reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    CorsConfig, ListenerConfig, LogFormat, ObservabilityConfig, ProxyConfig, RouteConfig,
    UpstreamConfig,
};
pub use validation::{validate_config, ValidationError};
