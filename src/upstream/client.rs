//! Outbound HTTP client for the upstream API.

use std::collections::HashMap;
use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::http::{Method, Request, Response, StatusCode, Uri};
use hyper::body::Incoming;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use serde::de::IgnoredAny;
use url::Url;

use crate::config::validation::{parse_upstream_base, ValidationError};
use crate::config::UpstreamConfig;
use crate::resilience::{with_deadline, DeadlineExceeded};
use crate::routing::{PathPattern, Segment};

/// Everything that can go wrong while fetching from the upstream.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("missing value for path parameter '{0}'")]
    MissingParam(String),

    #[error("path parameter '{0}' is a dot segment")]
    DotSegment(String),

    #[error("invalid upstream URI '{uri}': {reason}")]
    InvalidUri { uri: String, reason: String },

    #[error("failed to build upstream request: {0}")]
    Build(#[from] axum::http::Error),

    #[error("upstream request failed: {0}")]
    Request(#[from] hyper_util::client::legacy::Error),

    #[error("upstream timed out: {0}")]
    Timeout(#[from] DeadlineExceeded),

    #[error("upstream responded with status {0}")]
    Status(StatusCode),

    #[error("failed to read upstream body: {0}")]
    Body(#[source] axum::Error),

    #[error("upstream body is not valid JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),

    #[error("upstream task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),
}

/// Client bound to a single upstream base URL.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: Client<HttpConnector, Body>,
    base_url: Url,
    timeout: Duration,
    max_body_bytes: usize,
}

impl UpstreamClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, ValidationError> {
        let base_url = parse_upstream_base(&config.base_url)?;

        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(Duration::from_secs(config.connect_timeout_secs)));
        let client = Client::builder(TokioExecutor::new()).build(connector);

        Ok(Self {
            client,
            base_url,
            timeout: Duration::from_secs(config.timeout_secs),
            max_body_bytes: config.max_body_bytes,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Build the upstream URL for `template`, substituting `params`.
    ///
    /// Each value becomes exactly one path segment and is percent-encoded,
    /// so a decoded `a/b` is sent as `a%2Fb` rather than two segments.
    /// Values `.` and `..` are rejected since they resolve to a different
    /// upstream path, even when percent-encoded.
    pub fn url_for(
        &self,
        template: &PathPattern,
        params: &HashMap<String, String>,
    ) -> Result<Url, UpstreamError> {
        let mut url = self.base_url.clone();
        {
            let Ok(mut segments) = url.path_segments_mut() else {
                return Err(UpstreamError::InvalidUri {
                    uri: self.base_url.to_string(),
                    reason: "cannot be a base".to_string(),
                });
            };
            segments.pop_if_empty();
            for segment in template.segments() {
                match segment {
                    Segment::Literal(literal) => {
                        segments.push(literal);
                    }
                    Segment::Param(name) => {
                        let value = params
                            .get(name)
                            .ok_or_else(|| UpstreamError::MissingParam(name.clone()))?;
                        if value == "." || value == ".." {
                            return Err(UpstreamError::DotSegment(name.clone()));
                        }
                        segments.push(value);
                    }
                }
            }
        }
        Ok(url)
    }

    /// GET `url` and return its body if the status is 2xx and the body is JSON.
    pub async fn fetch_json(&self, url: &Url) -> Result<Bytes, UpstreamError> {
        let uri: Uri = url.as_str().parse().map_err(|e: axum::http::uri::InvalidUri| {
            UpstreamError::InvalidUri {
                uri: url.to_string(),
                reason: e.to_string(),
            }
        })?;

        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())?;

        with_deadline(self.timeout, self.send(request)).await?
    }

    async fn send(&self, request: Request<Body>) -> Result<Bytes, UpstreamError> {
        let response = self.client.request(request).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status));
        }

        let body = read_body(response, self.max_body_bytes).await?;
        serde_json::from_slice::<IgnoredAny>(&body)?;
        Ok(body)
    }
}

async fn read_body(response: Response<Incoming>, limit: usize) -> Result<Bytes, UpstreamError> {
    axum::body::to_bytes(Body::new(response.into_body()), limit)
        .await
        .map_err(UpstreamError::Body)
}
