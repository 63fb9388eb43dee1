pub mod api_routes;

use std::path::Path;

use axum::extract::DefaultBodyLimit;
use axum::routing::{any, get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::GatewayConfig;
use crate::errors::AppError;
use crate::service::chat_service::ChatGateway;
use crate::upstream::UpstreamClient;
use api_routes::{chat_handler, health_handler, proxy_handler};

/// Largest request body relayed upstream (CSV uploads).
const MAX_BODY_BYTES: usize = 20 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub chat: ChatGateway,
    pub erp: UpstreamClient,
}

impl AppState {
    pub fn new(config: &GatewayConfig) -> Result<Self, AppError> {
        let mcp = UpstreamClient::new("MCP", &config.mcp_api_url, config.upstream_timeout)?;
        let erp = UpstreamClient::new("ERP", &config.erp_api_url, config.upstream_timeout)?;
        Ok(Self { chat: ChatGateway::new(mcp), erp })
    }
}

/// API routes first; anything else is served from the compiled frontend.
pub fn router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/api/chat", post(chat_handler))
        .route("/api/{*path}", any(proxy_handler))
        .route("/healthz", get(health_handler))
        .fallback_service(ServeDir::new(static_dir))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
