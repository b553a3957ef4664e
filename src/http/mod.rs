//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection (axum::serve)
//!     → server.rs (middleware: request ID, trace span, CORS)
//!     → proxy.rs (matched route → params → upstream URL → fetch)
//!     → response.rs (200 + upstream bytes, or 500 + normalized error)
//!     → Send to client
//! ```

pub mod proxy;
pub mod request;
pub mod response;
pub mod server;

pub use proxy::register_routes;
pub use request::{MakeRequestUuidV4, X_REQUEST_ID};
pub use response::{ErrorResponse, ProxyResult, UPSTREAM_FAILURE_MESSAGE};
pub use server::{AppState, HttpServer, ServerHandle};
