//! HTTP transport implementation.
//!
//! Serves the guarded application over HTTP. Every route, including the
//! fallback, sits behind the request validation middleware, so trusted
//! admin paths accept arbitrary markup while all other paths are checked by
//! the default validator.

use axum::{
    Json, Router,
    extract::State,
    http::{Method, StatusCode, Uri},
    middleware,
    response::IntoResponse,
    routing::get,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, instrument};

use super::{TransportConfig, TransportError, TransportResult};
use crate::core::GuardServer;
use crate::domains::validation::middleware::request_validation;

/// HTTP transport handler.
pub struct HttpTransport {
    config: TransportConfig,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: TransportConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        self.config.address()
    }

    /// Build the application router for `server`.
    pub fn router(&self, server: GuardServer) -> Router {
        let validation = server.validation_state();

        let mut app = Router::new()
            .route("/health", get(health_check))
            .route("/", get(root_handler))
            .fallback(accept_handler)
            .with_state(server)
            .layer(middleware::from_fn_with_state(
                validation,
                request_validation,
            ))
            .layer(TraceLayer::new_for_http());

        if self.config.enable_cors {
            let cors = CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any);
            app = app.layer(cors);
        }

        app
    }

    /// Run the HTTP transport.
    pub async fn run(self, server: GuardServer) -> TransportResult<()> {
        let addr = self.address();
        let app = self.router(server);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        let cors_status = if self.config.enable_cors {
            "enabled"
        } else {
            "disabled"
        };
        info!("Ready - listening on {} (CORS {})", addr, cors_status);
        info!("  → Info:   GET /");
        info!("  → Health: GET /health");

        axum::serve(listener, app)
            .await
            .map_err(|e| TransportError::http(e.to_string()))?;

        Ok(())
    }
}

/// Root handler - provides service info.
async fn root_handler(State(server): State<GuardServer>) -> impl IntoResponse {
    Json(serde_json::json!({
        "name": server.name(),
        "version": server.version(),
        "transport": "HTTP",
        "trustedPrefixes": server.validator().prefixes(),
        "endpoints": {
            "info": "/",
            "health": "/health"
        }
    }))
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Any other route: request data passed validation.
#[instrument(skip_all, fields(method = %method, path = %uri.path()))]
async fn accept_handler(method: Method, uri: Uri) -> impl IntoResponse {
    info!("Accepted request");

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "accepted": true,
            "method": method.as_str(),
            "path": uri.path()
        })),
    )
}
