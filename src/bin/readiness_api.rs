//! Migration Readiness API Server
//!
//! REST API over the readiness engine and CPMM liquidity simulator
//!
//! Usage:
//!   cargo run --bin readiness_api
//!
//! Environment:
//!   PORT / READINESS_PORT - Server port (default: 8080)
//!   READINESS_HOST        - Server host (default: 0.0.0.0)
//!   READINESS_RATE_LIMIT  - Requests per minute per key (default: 100)
//!   READINESS_CONFIG      - JSON file overriding the default policy table
//!   RUST_LOG              - Log level (default: info)

use migration_readiness::api::{create_router, start_cleanup_task, AppState};
use migration_readiness::utils::constants::{APP_NAME, APP_VERSION};
use migration_readiness::{EngineConfig, ReadinessEngine, ServerConfig, TelemetryCollector};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    info!("🚀 {} API v{}", APP_NAME, APP_VERSION);

    let server_config = ServerConfig::from_env()?;
    let engine_config = EngineConfig::from_env()?;

    let telemetry = Arc::new(TelemetryCollector::new());
    let telemetry_for_shutdown = telemetry.clone();

    let state = Arc::new(AppState::new(ReadinessEngine::new(engine_config), telemetry));

    start_cleanup_task();
    info!("🧹 Background cleanup task started");

    let app = create_router(state);

    let addr: SocketAddr = server_config.bind_addr().parse()?;

    info!("🌐 Listening on http://{}", addr);
    info!(
        "   Rate limit: {} requests/minute",
        server_config.rate_limit_per_minute
    );
    info!("Endpoints:");
    info!("  POST /v1/readiness              - Full readiness report");
    info!("  POST /v1/readiness/batch        - Batch reports (up to 100 tokens)");
    info!("  POST /v1/liquidity/simulate     - CPMM slippage and LP seeding");
    info!("  POST /v1/liquidity/minimum-tvl  - TVL needed for a slippage bound");
    info!("  POST /v1/strategy               - Strategy from module scores");
    info!("  GET  /v1/stats                  - Server statistics");
    info!("  GET  /v1/health                 - Health check");
    info!("Press Ctrl+C for graceful shutdown");

    let listener = TcpListener::bind(addr).await?;

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("🛑 Shutdown signal received, exporting telemetry...");
    let stats = telemetry_for_shutdown.get_stats();
    for line in stats.summary().lines() {
        info!("   {}", line);
    }

    match telemetry_for_shutdown.export_stats_json() {
        Ok(path) => info!("   ✅ Stats exported to: {}", path.display()),
        Err(e) => warn!("   ⚠️ Failed to export stats: {}", e),
    }
    match telemetry_for_shutdown.export_stats_csv() {
        Ok(path) => info!("   ✅ History appended to: {}", path.display()),
        Err(e) => warn!("   ⚠️ Failed to append history: {}", e),
    }

    info!("👋 {} API shutdown complete", APP_NAME);

    Ok(())
}
