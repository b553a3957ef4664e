//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check that every route's local and upstream placeholders agree
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Detect conflicting routes
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use url::Url;

use crate::config::schema::ProxyConfig;
use crate::routing::pattern::PatternError;
use crate::routing::router::RouteTable;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("route '{route}': invalid {field} pattern: {source}")]
    InvalidPattern {
        route: String,
        field: &'static str,
        source: PatternError,
    },

    #[error("route '{route}': path placeholders {local:?} differ from upstream placeholders {upstream:?}")]
    PlaceholderMismatch {
        route: String,
        local: Vec<String>,
        upstream: Vec<String>,
    },

    #[error("route '{route}': path '{path}' conflicts with route '{existing}'")]
    ConflictingPath {
        route: String,
        path: String,
        existing: String,
    },

    #[error("route '{route}': path '{path}' is reserved")]
    ReservedPath { route: String, path: String },

    #[error("duplicate route name '{0}'")]
    DuplicateName(String),

    #[error("route table is empty")]
    NoRoutes,

    #[error("invalid upstream base URL '{url}': {reason}")]
    InvalidUpstreamUrl { url: String, reason: String },

    #[error("invalid bind address '{0}'")]
    InvalidBindAddress(String),

    #[error("invalid metrics address '{0}'")]
    InvalidMetricsAddress(String),

    #[error("upstream timeout must be greater than zero")]
    ZeroTimeout,
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if let Err(e) = parse_upstream_base(&config.upstream.base_url) {
        errors.push(e);
    }

    if config.upstream.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if let Err(route_errors) = RouteTable::from_config(&config.routes) {
        errors.extend(route_errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Parse and check the upstream base URL.
pub fn parse_upstream_base(raw: &str) -> Result<Url, ValidationError> {
    let invalid = |reason: &str| ValidationError::InvalidUpstreamUrl {
        url: raw.to_string(),
        reason: reason.to_string(),
    };

    let url = Url::parse(raw).map_err(|e| invalid(&e.to_string()))?;
    if url.scheme() != "http" {
        return Err(invalid("only http upstreams are supported"));
    }
    if url.cannot_be_a_base() || url.host().is_none() {
        return Err(invalid("missing host"));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("query and fragment are not allowed"));
    }
    Ok(url)
}
