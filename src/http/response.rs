//! Response envelope.
//!
//! # Responsibilities
//! - Relay a successful upstream body unchanged with status 200
//! - Collapse every upstream failure into one opaque 500 body
//!
//! # Design Decisions
//! - The success body is the upstream's bytes, not a re-serialized value
//! - Failure causes are logged by the handler, never shown to the client

use axum::{
    body::Bytes,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Error body returned for any upstream failure.
pub const UPSTREAM_FAILURE_MESSAGE: &str = "Failed to fetch information from API";

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
}

/// Outcome of one forwarded call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProxyResult {
    /// Upstream answered 2xx with a JSON body.
    Success(Bytes),
    /// Anything else.
    Failure,
}

impl ProxyResult {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyResult::Success(_) => StatusCode::OK,
            ProxyResult::Failure => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ProxyResult {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ProxyResult::Success(body) => (
                status,
                [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
                body,
            )
                .into_response(),
            ProxyResult::Failure => (
                status,
                Json(ErrorResponse {
                    error: UPSTREAM_FAILURE_MESSAGE.to_string(),
                }),
            )
                .into_response(),
        }
    }
}

/// Fallback for paths outside the route table.
pub async fn not_found() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "Not found".to_string(),
        }),
    )
}
