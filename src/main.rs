//! Trapdoor - A dead-man's-switch countdown server
//!
//! This is the main entry point for the trapdoor application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use trapdoor::{
    api::create_router,
    config::Config,
    state::{AppState, CountdownEngine},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("trapdoor={},tower_http=info", config.log_level()))
        .init();

    info!("Starting trapdoor server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, time={}s",
          config.host, config.port, config.time);

    let action = config.trigger_action();
    if action.script_exists() {
        info!("Trigger script: {} (workdir {})",
              action.script.display(), action.working_dir.display());
    } else {
        warn!("Trigger script {} does not exist yet; the countdown will record it as not found",
              action.script.display());
    }

    let engine = CountdownEngine::new(config.time, action);
    let state = Arc::new(AppState::new(engine, config.port, config.host.clone()));
    let app = create_router(state);

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start             - Start the countdown");
    info!("  POST /stop              - Stop the countdown");
    info!("  POST /reset             - Reset to the configured duration");
    info!("  POST /set_time/:seconds - Configure the duration");
    info!("  GET  /status            - Current countdown state");
    info!("  GET  /stream            - Live updates (server-sent events)");
    info!("  GET  /health            - Health check");

    // Live update streams never finish, so the server is raced against the
    // signal instead of drained gracefully.
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                error!("Server error: {}", e);
            }
        }
        result = shutdown_signal() => {
            result?;
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
