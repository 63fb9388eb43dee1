mod config;
mod errors;
mod models;
mod routes;
mod service;
mod upstream;

use tracing::{info, warn};

use crate::config::GatewayConfig;
use crate::routes::{AppState, router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (development convenience)
    dotenvy::dotenv().ok();

    // Initialise tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "erp_mcp_web=debug,tower_http=debug".into()),
        )
        .init();

    // ── Upstream services ─────────────────────────────────────────────────────
    let config = GatewayConfig::from_env();
    info!(
        "ERP data service at {}, chat service at {}, upstream timeout {:?}",
        config.erp_api_url, config.mcp_api_url, config.upstream_timeout
    );

    if !config.static_dir.exists() {
        warn!(
            "Static directory {} not found; build the frontend with `trunk build` first",
            config.static_dir.display()
        );
    }

    // ── Router ────────────────────────────────────────────────────────────────
    let state = AppState::new(&config)?;
    let app = router(state, &config.static_dir);

    // ── Listen ────────────────────────────────────────────────────────────────
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{addr}/");

    axum::serve(listener, app).await?;
    Ok(())
}
