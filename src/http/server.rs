//! HTTP server setup.
//!
//! # Responsibilities
//! - Build the Axum router (funding, listing, admin)
//! - Wire up middleware (request ID, tracing, timeout)
//! - Serve until shutdown is signalled

use axum::body::Body;
use axum::http::Request;
use axum::routing::{get, post};
use axum::Router;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::admin;
use crate::config::{AdminConfig, FaucetServiceConfig, ServerConfig};
use crate::faucet::FaucetRegistry;
use crate::http::handlers::{health, list_faucets, request_native, request_token};
use crate::http::request::{request_id, UuidRequestId};

/// State shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub registry: FaucetRegistry,
    pub admin_api_key: String,
}

/// HTTP front-end for the faucets.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    pub fn new(config: &FaucetServiceConfig, registry: FaucetRegistry) -> Self {
        let state = AppState {
            registry,
            admin_api_key: config.admin.api_key.clone(),
        };
        Self {
            router: Self::build_router(&config.server, &config.admin, state),
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(server: &ServerConfig, admin: &AdminConfig, state: AppState) -> Router {
        let mut router = Router::new()
            .route("/health", get(health))
            .route("/v1/faucets", get(list_faucets))
            .route("/v1/faucets/{id}/native", post(request_native))
            .route("/v1/faucets/{id}/token", post(request_token));

        if admin.enabled {
            router = router.merge(admin::router(state.clone()));
        }

        router
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(server.request_timeout_secs)))
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "http",
                    method = %request.method(),
                    path = %request.uri().path(),
                    request_id = %request_id(request),
                )
            }))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
    }

    /// Router with state and middleware applied.
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Serve on `listener` until `shutdown` fires.
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
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
