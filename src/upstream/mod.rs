//! Upstream API access.
//!
//! # Data Flow
//! ```text
//! CompiledRoute.upstream + extracted path params
//!     → client.rs url_for (segment-wise substitution onto the base URL)
//!     → client.rs fetch_json (GET, deadline, status + JSON checks)
//!     → raw JSON bytes or UpstreamError
//! ```
//!
//! # Design Decisions
//! - One shared hyper-util client with its own connection pool
//! - The response body is relayed as received, never re-serialized
//! - Every failure cause stays distinguishable here; collapsing them is the handler's job

pub mod client;

pub use client::{UpstreamClient, UpstreamError};
