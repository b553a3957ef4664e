//! Pass-through HTTP proxy for the F1 data API.
//!
//! Every route in the table forwards one GET to the upstream API and relays
//! the JSON body, or a uniform 500 error when anything goes wrong.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod resilience;
pub mod routing;
pub mod upstream;

pub use config::ProxyConfig;
pub use http::{HttpServer, ServerHandle};
pub use lifecycle::Shutdown;
