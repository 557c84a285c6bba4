//! Selfitch - A state-managed HTTP server for work-session countdown timing
//!
//! This is the main entry point for the selfitch application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use selfitch::{
    config::Config,
    state::AppState,
    api::create_router,
    tasks::session_ticker_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("selfitch={},tower_http=info", config.log_level()))
        .init();

    info!("Starting selfitch server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}", config.host, config.port);

    // Create application state
    let state = AppState::shared(config.port, config.host.clone());

    // Start the session ticker background task
    let ticker_state = Arc::clone(&state);
    tokio::spawn(async move {
        session_ticker_task(ticker_state).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /configure - Set the session length in minutes");
    info!("  POST /start     - Begin the countdown");
    info!("  POST /pause     - Pause or resume the countdown");
    info!("  POST /stop      - Stop and reset the session");
    info!("  GET  /status    - Check current timer status");
    info!("  GET  /presets   - Suggested session lengths");
    info!("  GET  /health    - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    // Cancel any active session so no tick trigger outlives the server
    let snapshot = state.get_timer_snapshot();
    if snapshot.is_running() || snapshot.phase == selfitch::SessionPhase::Paused {
        info!("Stopping active session before exit");
        state.stop();
    }

    info!("Server shutdown complete");
    Ok(())
}
