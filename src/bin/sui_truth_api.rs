//! SuiTruth API Server
//!
//! REST API over the address trust resolver
//!
//! Usage:
//!   cargo run --bin sui_truth_api
//!
//! Environment:
//!   SUI_TRUTH_PORT - Server port (default: 8080, `PORT` takes precedence)
//!   SUI_TRUTH_HOST - Server host (default: 0.0.0.0)
//!   SUI_RPC_URL    - Fullnode JSON-RPC endpoint
//!   RUST_LOG       - Log level (default: info)

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use sui_truth::api::{create_router, handlers::AppState};
use sui_truth::utils::constants::APP_VERSION;
use sui_truth::{init_tracing, Resolver, ResolverConfig};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    init_tracing();

    print_banner();

    let config = ResolverConfig::from_env()?;
    let resolver = Arc::new(Resolver::new(&config)?);
    let state = Arc::new(AppState::new(resolver.clone()));

    let app = create_router(state);

    // Hosting platforms set PORT, fallback to SUI_TRUTH_PORT for local dev
    let host = std::env::var("SUI_TRUTH_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("PORT")
        .or_else(|_| std::env::var("SUI_TRUTH_PORT"))
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("🚀 SuiTruth API starting on http://{}", addr);
    info!("");
    info!("Endpoints:");
    info!("  GET    /v1/profile/:address - Resolve one address or coin type");
    info!("  POST   /v1/resolve          - Resolve {{\"address\": ...}}");
    info!("  POST   /v1/profiles         - Batch resolve (up to 100)");
    info!("  GET    /v1/name/:domain     - SuiNS lookup");
    info!("  GET    /v1/cache/stats      - Cache and breaker statistics");
    info!("  POST   /v1/cache/prune      - Drop expired cache entries");
    info!("  DELETE /v1/cache            - Clear the cache");
    info!("  GET    /v1/health           - Health check");
    info!("");
    info!("Press Ctrl+C for graceful shutdown");

    let listener = TcpListener::bind(addr).await?;

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("⚠️ Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("");
    info!("🛑 Shutdown signal received");
    let stats = resolver.stats();
    info!("   Cached profiles: {} ({} expired)", stats.total, stats.expired);
    info!("   Cache hits/misses: {}/{}", stats.hits, stats.misses);
    info!("👋 SuiTruth API shutdown complete");

    Ok(())
}

fn print_banner() {
    println!(
        r#"
    ╔══════════════════════════════════════════════╗
    ║                                              ║
    ║        S U I   T R U T H   v{:<8}         ║
    ║     Address Trust Resolution Service         ║
    ║                                              ║
    ╚══════════════════════════════════════════════╝
    "#,
        APP_VERSION
    );
}
