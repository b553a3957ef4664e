//! Compiled route table.
//!
//! # Responsibilities
//! - Parse every configured route into local pattern + upstream template
//! - Enforce placeholder agreement between the two
//! - Reject conflicting or reserved local paths
//!
//! # Design Decisions
//! - Immutable after construction (shared via Arc without locks)
//! - Compilation reports every broken route, not only the first

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::config::validation::ValidationError;
use crate::config::RouteConfig;
use crate::routing::pattern::PathPattern;
use crate::routing::HEALTH_PATH;

/// A route ready to be registered with the HTTP router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledRoute {
    pub name: String,
    pub local: PathPattern,
    pub upstream: PathPattern,
}

/// The full set of compiled routes, in configuration order.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Arc<CompiledRoute>>,
}

impl RouteTable {
    /// Compile route definitions, collecting every error found.
    pub fn from_config(configs: &[RouteConfig]) -> Result<Self, Vec<ValidationError>> {
        let mut errors = Vec::new();
        let mut routes = Vec::with_capacity(configs.len());
        let mut names: HashSet<&str> = HashSet::new();
        let mut shapes: HashMap<String, &str> = HashMap::new();

        if configs.is_empty() {
            errors.push(ValidationError::NoRoutes);
        }

        for config in configs {
            if !names.insert(config.name.as_str()) {
                errors.push(ValidationError::DuplicateName(config.name.clone()));
            }

            let local = PathPattern::parse(&config.path).map_err(|source| {
                ValidationError::InvalidPattern {
                    route: config.name.clone(),
                    field: "path",
                    source,
                }
            });
            let upstream = PathPattern::parse(&config.upstream).map_err(|source| {
                ValidationError::InvalidPattern {
                    route: config.name.clone(),
                    field: "upstream",
                    source,
                }
            });

            let (local, upstream) = match (local, upstream) {
                (Ok(local), Ok(upstream)) => (local, upstream),
                (local, upstream) => {
                    errors.extend(local.err());
                    errors.extend(upstream.err());
                    continue;
                }
            };

            if local.placeholder_set() != upstream.placeholder_set() {
                errors.push(ValidationError::PlaceholderMismatch {
                    route: config.name.clone(),
                    local: owned(local.placeholders()),
                    upstream: owned(upstream.placeholders()),
                });
                continue;
            }

            let shape = local.shape();
            if shape == HEALTH_PATH {
                errors.push(ValidationError::ReservedPath {
                    route: config.name.clone(),
                    path: config.path.clone(),
                });
                continue;
            }
            if let Some(existing) = shapes.insert(shape, config.name.as_str()) {
                errors.push(ValidationError::ConflictingPath {
                    route: config.name.clone(),
                    path: config.path.clone(),
                    existing: existing.to_string(),
                });
                continue;
            }

            routes.push(Arc::new(CompiledRoute {
                name: config.name.clone(),
                local,
                upstream,
            }));
        }

        if errors.is_empty() {
            Ok(Self { routes })
        } else {
            Err(errors)
        }
    }

    pub fn routes(&self) -> &[Arc<CompiledRoute>] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

fn owned(names: Vec<&str>) -> Vec<String> {
    names.into_iter().map(str::to_string).collect()
}
