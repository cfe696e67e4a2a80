//! GPA Calculator API Server
//!
//! Usage:
//!   cargo run --bin gpa_api
//!
//! Environment:
//!   PORT / GPA_PORT - Server port (default: 8080)
//!   GPA_HOST        - Server host (default: 0.0.0.0)
//!   RUST_LOG        - Log level (default: info)

use gpa_calc::api::{create_router, handlers::AppState, start_cleanup_task};
use gpa_calc::ServerConfig;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    let config = ServerConfig::default();
    let state = Arc::new(AppState::new());

    // Background task dropping expired rate-limit windows
    start_cleanup_task();

    let app = create_router(state);

    let addr: SocketAddr = config.bind_addr().parse()?;

    info!("GPA Calculator API starting on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /api/calculate - Term + cumulative GPA calculation");
    info!("  GET  /api/scale     - Letter grade scale");
    info!("  GET  /api/health    - Health check");
    info!("Press Ctrl+C for graceful shutdown");

    let listener = TcpListener::bind(addr).await?;

    let shutdown_signal = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("Shutdown signal received, GPA API stopped");

    Ok(())
}
