//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router exposing the endpoint at the configured path
//! - Wire up middleware (request ID, tracing, panic recovery, timeout)
//! - Apply configuration updates to the live endpoint
//! - Serve until a shutdown signal arrives

use std::any::Any;
use std::time::Duration;

use axum::{
    extract::{RawQuery, State},
    http::StatusCode,
    middleware::from_fn_with_state,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::{ConfigHandle, ServiceConfig};
use crate::http::error::UNEXPECTED_ERROR_MESSAGE;
use crate::http::handler::{error_response, EndpointHandler};
use crate::http::middleware::enforce_timeout;
use crate::http::params::RawParameters;
use crate::http::request::{MakeRequestUuidV4, X_REQUEST_ID};
use crate::lifecycle::signals::shutdown_signal;
use crate::observability::logging::LogFilterHandle;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub handler: EndpointHandler,
}

/// HTTP server for the endpoint.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
    handler: EndpointHandler,
    log_filter: LogFilterHandle,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// The config is expected to have passed
    /// [`validate_config`](crate::config::validate_config).
    pub fn new(config: ServiceConfig) -> Self {
        let handler = EndpointHandler::new(ConfigHandle::new(config.endpoint.clone()));
        let state = AppState {
            handler: handler.clone(),
        };

        let router = Self::build_router(&config, state);
        Self {
            router,
            config,
            handler,
            log_filter: LogFilterHandle::default(),
        }
    }

    /// Rebuild the log filter from each config update.
    pub fn with_log_filter(mut self, log_filter: LogFilterHandle) -> Self {
        self.log_filter = log_filter;
        self
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        let middleware = ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuidV4))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(CatchPanicLayer::custom(panic_response))
            .layer(from_fn_with_state(
                Duration::from_secs(config.timeouts.request_secs),
                enforce_timeout,
            ));

        Router::new()
            .route(&config.endpoint.servlet_path, get(endpoint_handler))
            .with_state(state)
            .layer(middleware)
    }

    /// Router with all layers, for serving or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Live endpoint handler; its config can be swapped while serving.
    pub fn handler(&self) -> &EndpointHandler {
        &self.handler
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Configs received on `config_updates` replace the endpoint config
    /// atomically. Serving stops on `shutdown` or an OS signal.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<ServiceConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            path = %self.config.endpoint.servlet_path,
            "HTTP server starting"
        );

        let handle = self.handler.config().clone();
        let mounted_path = self.config.endpoint.servlet_path.clone();
        let log_filter = self.log_filter.clone();
        tokio::spawn(async move {
            while let Some(new_config) = config_updates.recv().await {
                if new_config.endpoint.servlet_path != mounted_path {
                    tracing::warn!(
                        mounted = %mounted_path,
                        configured = %new_config.endpoint.servlet_path,
                        "Servlet path change takes effect after restart"
                    );
                }
                log_filter.apply(&new_config);
                handle.activate(new_config.endpoint);
            }
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = shutdown.recv() => {}
                    _ = shutdown_signal() => {}
                }
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// GET handler: query string → pipeline → response.
async fn endpoint_handler(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> impl IntoResponse {
    let raw = RawParameters::from_query(query.as_deref().unwrap_or_default());
    state.handler.handle(&raw)
}

/// Last-resort response when the pipeline panics. The cause is logged,
/// never returned.
fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| err.downcast_ref::<String>().cloned())
        .unwrap_or_default();
    tracing::error!(panic = %detail, "Panic while processing request");
    error_response(StatusCode::INTERNAL_SERVER_ERROR, UNEXPECTED_ERROR_MESSAGE).into_response()
}
