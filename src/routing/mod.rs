//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! RouteConfig[] (config file or built-in table)
//!     → pattern.rs (parse local path + upstream template)
//!     → router.rs (placeholder checks, conflict detection)
//!     → RouteTable (immutable, shared via Arc)
//!     → http::proxy::register_routes (one GET handler per route)
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Path matching itself is delegated to axum
//! - Local and upstream placeholders must be the same set

pub mod pattern;
pub mod router;
pub mod table;

pub use pattern::{PathPattern, PatternError, Segment};
pub use router::{CompiledRoute, RouteTable};

/// Liveness endpoint served by the proxy itself.
pub const HEALTH_PATH: &str = "/health";
