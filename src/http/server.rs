//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with one POST handler per route binding
//! - Wire up middleware (tracing, body limit, request ID)
//! - Bind server to listener
//! - Hand each request to the forwarder

use axum::{
    body::{Body, Bytes},
    extract::{DefaultBodyLimit, State},
    http::{header, HeaderMap, Request},
    routing::post,
    Router,
};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::RelayConfig;
use crate::error::RelayResult;
use crate::http::request::{request_id_layer, InboundBody, X_REQUEST_ID};
use crate::http::response::UpstreamResponse;
use crate::routing::{RouteBinding, ROUTES};
use crate::upstream::{ClientBuildError, Forwarder};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub forwarder: Arc<Forwarder>,
}

/// HTTP server for the relay.
pub struct HttpServer {
    router: Router,
    config: Arc<RelayConfig>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: RelayConfig) -> Result<Self, ClientBuildError> {
        let forwarder = Arc::new(Forwarder::new(&config.upstream)?);
        let state = AppState { forwarder };

        let router = Self::build_router(&config, state);
        Ok(Self {
            router,
            config: Arc::new(config),
        })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &RelayConfig, state: AppState) -> Router {
        let mut router = Router::new();
        for route in ROUTES {
            router = router.route(
                route.external,
                post(move |State(state): State<AppState>, headers: HeaderMap, body: Bytes| {
                    relay(state, route, headers, body)
                }),
            );
        }

        router
            .with_state(state)
            .layer(DefaultBodyLimit::max(config.listener.max_body_bytes))
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                let request_id = request
                    .headers()
                    .get(X_REQUEST_ID)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("unknown");
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    path = %request.uri().path(),
                    request_id = %request_id,
                )
            }))
            .layer(request_id_layer())
    }

    /// The router, for driving the service without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` resolves, then drain in-flight requests.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            routes = ROUTES.len(),
            upstream = %self.config.upstream.normalized_base_url(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }
}

/// Relay handler shared by every route.
async fn relay(
    state: AppState,
    route: &'static RouteBinding,
    headers: HeaderMap,
    body: Bytes,
) -> RelayResult<UpstreamResponse> {
    let body = InboundBody::from_bytes(headers.get(header::CONTENT_TYPE), body);
    tracing::debug!(route = route.external, family = route.family(), "Forwarding request");

    state.forwarder.forward(route.upstream, body).await
}
