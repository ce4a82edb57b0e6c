//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the invocation and health handlers
//! - Wire up middleware (tracing, limits, timeout, request ID)
//! - Bind server to listener and stop on the shutdown broadcast

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::HandlerConfig;
use crate::handler::handle_json;
use crate::http::request::{request_id_of, MakeInvocationId};
use crate::mapping::MappingTable;

/// Path the function runtime posts invocations to.
pub const INVOCATION_PATH: &str = "/2015-03-31/functions/function/invocations";

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub mapping: Arc<MappingTable>,
    pub max_event_bytes: usize,
}

/// Invocation endpoint emulating the edge function runtime.
pub struct HttpServer {
    router: Router,
    config: HandlerConfig,
}

impl HttpServer {
    /// Create a new server over a loaded mapping table.
    pub fn new(config: HandlerConfig, mapping: Arc<MappingTable>) -> Self {
        let state = AppState {
            mapping,
            max_event_bytes: config.limits.max_event_bytes,
        };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &HandlerConfig, state: AppState) -> Router {
        Router::new()
            .route(INVOCATION_PATH, post(invoke_handler))
            .route("/health", get(health_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(RequestBodyLimitLayer::new(config.limits.max_event_bytes))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeInvocationId))
    }

    /// A clone of the configured router, for in-process dispatch.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &HandlerConfig {
        &self.config
    }

    /// Serve until the shutdown broadcast fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, path = INVOCATION_PATH, "Invocation endpoint starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("Invocation endpoint stopped");
        Ok(())
    }
}

fn error_body(error_type: &str, message: &str) -> Json<Value> {
    Json(json!({ "errorType": error_type, "errorMessage": message }))
}

async fn invoke_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let request_id = request_id_of(&request);

    let payload = match axum::body::to_bytes(request.into_body(), state.max_event_bytes).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(request_id = %request_id, error = %e, "Event payload rejected");
            return (
                StatusCode::PAYLOAD_TOO_LARGE,
                error_body("PayloadTooLarge", &e.to_string()),
            )
                .into_response();
        }
    };

    match handle_json(&state.mapping, &payload) {
        Ok(cf_request) => {
            tracing::info!(
                request_id = %request_id,
                uri = cf_request.uri.as_deref().unwrap_or("-"),
                "Invocation complete"
            );
            Json(cf_request).into_response()
        }
        Err(e) => {
            tracing::warn!(request_id = %request_id, error = %e, "Invocation failed");
            (StatusCode::BAD_REQUEST, error_body(e.error_type(), &e.to_string())).into_response()
        }
    }
}

async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "status": "ok", "mappings": state.mapping.len() }))
}
