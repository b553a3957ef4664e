//! Path pattern parsing.
//!
//! # Responsibilities
//! - Parse local path patterns and upstream path templates
//! - Accept both `:name` and `{name}` placeholder syntax
//! - Render patterns in the router's native `{name}` form
//!
//! # Design Decisions
//! - Patterns are split on `/` once at load time; nothing is re-parsed per request
//! - Placeholders always occupy a whole segment
//! - Empty segments are rejected so every pattern has one canonical form

use std::fmt;

/// Error type for malformed path patterns.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error("pattern must start with '/'")]
    MissingLeadingSlash,
    #[error("pattern contains an empty segment")]
    EmptySegment,
    #[error("invalid placeholder name '{0}'")]
    InvalidPlaceholder(String),
    #[error("placeholder '{0}' appears more than once")]
    DuplicatePlaceholder(String),
    #[error("segment '{0}' contains reserved characters")]
    ReservedCharacter(String),
}

/// One `/`-separated piece of a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Literal(String),
    Param(String),
}

/// A parsed path pattern such as `/api/f1/get_driver_points/:year`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Parse a pattern string.
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        let rest = pattern
            .strip_prefix('/')
            .ok_or(PatternError::MissingLeadingSlash)?;

        let mut segments = Vec::new();
        if rest.is_empty() {
            return Ok(Self { segments });
        }

        for raw in rest.split('/') {
            if raw.is_empty() {
                return Err(PatternError::EmptySegment);
            }
            let segment = parse_segment(raw)?;
            if let Segment::Param(name) = &segment {
                if segments.contains(&segment) {
                    return Err(PatternError::DuplicatePlaceholder(name.clone()));
                }
            }
            segments.push(segment);
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Placeholder names in the order they appear.
    pub fn placeholders(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Param(name) => Some(name.as_str()),
                Segment::Literal(_) => None,
            })
            .collect()
    }

    /// Placeholder names sorted, for set comparison.
    pub fn placeholder_set(&self) -> Vec<&str> {
        let mut names = self.placeholders();
        names.sort_unstable();
        names
    }

    /// Render in axum's `{name}` capture syntax.
    pub fn to_axum_path(&self) -> String {
        self.to_string()
    }

    /// Structural key: two patterns with the same shape match the same requests.
    pub fn shape(&self) -> String {
        if self.segments.is_empty() {
            return "/".to_string();
        }
        self.segments
            .iter()
            .map(|s| match s {
                Segment::Literal(lit) => format!("/{lit}"),
                Segment::Param(_) => "/{}".to_string(),
            })
            .collect()
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "/");
        }
        for segment in &self.segments {
            match segment {
                Segment::Literal(lit) => write!(f, "/{lit}")?,
                Segment::Param(name) => write!(f, "/{{{name}}}")?,
            }
        }
        Ok(())
    }
}

fn parse_segment(raw: &str) -> Result<Segment, PatternError> {
    let name = if let Some(name) = raw.strip_prefix(':') {
        Some(name)
    } else if raw.starts_with('{') {
        Some(
            raw.strip_prefix('{')
                .and_then(|r| r.strip_suffix('}'))
                .ok_or_else(|| PatternError::InvalidPlaceholder(raw.to_string()))?,
        )
    } else {
        None
    };

    match name {
        Some(name) if is_identifier(name) => Ok(Segment::Param(name.to_string())),
        Some(name) => Err(PatternError::InvalidPlaceholder(name.to_string())),
        None if raw.contains(['{', '}', '*', ':', '?', '#']) => {
            Err(PatternError::ReservedCharacter(raw.to_string()))
        }
        None => Ok(Segment::Literal(raw.to_string())),
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
