//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Compile the route table and build the upstream client
//! - Create the Axum Router with the proxy handlers, health check and fallback
//! - Wire up middleware (request ID, tracing, CORS)
//! - Serve on a caller-provided listener until told to stop

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Body,
    http::Request,
    routing::get,
    Json, Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::{validate_config, ConfigError, ProxyConfig};
use crate::http::proxy::register_routes;
use crate::http::request::{request_id, MakeRequestUuidV4};
use crate::http::response::{not_found, HealthResponse};
use crate::lifecycle::Shutdown;
use crate::routing::{RouteTable, HEALTH_PATH};
use crate::upstream::UpstreamClient;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<UpstreamClient>,
}

/// HTTP server for the proxy.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// Fails if the configuration does not validate; nothing is bound yet.
    pub fn new(config: ProxyConfig) -> Result<Self, ConfigError> {
        validate_config(&config).map_err(ConfigError::Validation)?;

        let routes = RouteTable::from_config(&config.routes).map_err(ConfigError::Validation)?;
        let upstream = UpstreamClient::new(&config.upstream)
            .map_err(|e| ConfigError::Validation(vec![e]))?;

        tracing::info!(
            routes = routes.len(),
            upstream = %upstream.base_url(),
            timeout = ?upstream.timeout(),
            "Route table loaded"
        );

        let state = AppState {
            upstream: Arc::new(upstream),
        };

        let router = Self::build_router(&config, &routes, state);
        Ok(Self { router })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ProxyConfig, routes: &RouteTable, state: AppState) -> Router {
        let router = register_routes(routes)
            .route(HEALTH_PATH, get(health_handler))
            .fallback(not_found)
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
                    .layer(
                        TraceLayer::new_for_http()
                            .make_span_with(|request: &Request<Body>| {
                                tracing::info_span!(
                                    "request",
                                    method = %request.method(),
                                    path = %request.uri().path(),
                                    request_id = %request_id(request.headers()),
                                )
                            })
                            // Upstream failures are logged once, by the dispatcher.
                            .on_failure(()),
                    )
                    .layer(PropagateRequestIdLayer::x_request_id()),
            );

        if config.cors.enabled {
            router.layer(CorsLayer::permissive())
        } else {
            router
        }
    }

    /// The fully layered router, for in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve on `listener` until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server draining");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Spawn the server onto the runtime and return a handle that can stop it.
    pub fn start(self, listener: TcpListener) -> Result<ServerHandle, std::io::Error> {
        let local_addr = listener.local_addr()?;
        let shutdown = Shutdown::new();
        let task = tokio::spawn(self.run(listener, shutdown.subscribe()));

        Ok(ServerHandle {
            local_addr,
            shutdown,
            task,
        })
    }
}

/// A running server started with [`HttpServer::start`].
pub struct ServerHandle {
    local_addr: SocketAddr,
    shutdown: Shutdown,
    task: JoinHandle<Result<(), std::io::Error>>,
}

impl ServerHandle {
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Trigger graceful shutdown and wait for the server task to finish.
    pub async fn stop(self) -> Result<(), std::io::Error> {
        self.shutdown.trigger();
        self.task.await.map_err(std::io::Error::other)?
    }
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
