//! Proxy dispatch.
//!
//! # Responsibilities
//! - Register one GET handler per compiled route
//! - Extract path parameters and substitute them into the upstream template
//! - Forward to the upstream and relay the body or a normalized error
//!
//! # Design Decisions
//! - A single generic handler serves every route; the route is captured per registration
//! - The upstream call runs in its own task and finishes even if the client goes away
//! - Every failure is logged with its cause and returned as the same 500

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    routing::{get, MethodRouter},
    Router,
};

use crate::http::request::request_id;
use crate::http::response::ProxyResult;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::routing::{CompiledRoute, RouteTable};
use crate::upstream::UpstreamError;

/// Register every route in `table`, returning a router that still needs state.
pub fn register_routes(table: &RouteTable) -> Router<AppState> {
    table.routes().iter().fold(Router::new(), |router, route| {
        tracing::debug!(
            route = %route.name,
            path = %route.local,
            upstream = %route.upstream,
            "Registering route"
        );
        router.route(&route.local.to_axum_path(), method_router(route.clone()))
    })
}

fn method_router(route: Arc<CompiledRoute>) -> MethodRouter<AppState> {
    if route.local.placeholders().is_empty() {
        get(move |State(state): State<AppState>, headers: HeaderMap| {
            let route = route.clone();
            async move { dispatch(state, route, HashMap::new(), headers).await }
        })
    } else {
        get(
            move |State(state): State<AppState>,
                  Path(params): Path<HashMap<String, String>>,
                  headers: HeaderMap| {
                let route = route.clone();
                async move { dispatch(state, route, params, headers).await }
            },
        )
    }
}

async fn dispatch(
    state: AppState,
    route: Arc<CompiledRoute>,
    params: HashMap<String, String>,
    headers: HeaderMap,
) -> Response {
    let start_time = Instant::now();
    let request_id = request_id(&headers);

    tracing::debug!(
        request_id = %request_id,
        route = %route.name,
        params = ?params,
        "Proxying request"
    );

    let result = match forward(&state, &route, &params).await {
        Ok(body) => ProxyResult::Success(body),
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                route = %route.name,
                error = %e,
                "Failed to fetch information from upstream"
            );
            ProxyResult::Failure
        }
    };

    metrics::record_request(&route.name, result.status().as_u16(), start_time);
    result.into_response()
}

async fn forward(
    state: &AppState,
    route: &CompiledRoute,
    params: &HashMap<String, String>,
) -> Result<Bytes, UpstreamError> {
    let url = state.upstream.url_for(&route.upstream, params)?;
    tracing::debug!(url = %url, "Forwarding to upstream");

    let upstream = state.upstream.clone();
    tokio::spawn(async move { upstream.fetch_json(&url).await }).await?
}
