//! Stage Timer - presentation timer core with an overlay display
//!
//! This is the main entry point for the stage-timer server.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use stage_timer::{
    api::create_router,
    config::Config,
    controller::Controller,
    services::{load_displays, StaticDisplays},
    state::AppState,
    store::StateStore,
    tasks::{tick_task, SystemClock},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("stage_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting stage-timer server v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: host={}, port={}, tick={:?}, policies={:?}",
        config.host,
        config.port,
        config.tick_interval(),
        config.policies()
    );

    let displays = match &config.displays {
        Some(path) => match load_displays(path) {
            Ok(displays) if !displays.is_empty() => StaticDisplays::new(displays),
            Ok(_) => {
                warn!("Display file {} is empty, assuming one 1920x1080 display", path.display());
                StaticDisplays::single_primary()
            }
            Err(e) => {
                warn!("{:#}; assuming one 1920x1080 display", e);
                StaticDisplays::single_primary()
            }
        },
        None => StaticDisplays::single_primary(),
    };

    let store = StateStore::new(config.state_path());
    info!("State file: {}", store.path().display());

    // Load state, lay out the overlay, then start ticking
    let controller = Controller::new(store, Box::new(displays), config.policies());
    let state = Arc::new(AppState::new(
        controller,
        Arc::new(SystemClock),
        config.port,
        config.host.clone(),
    ));

    let tick_state = Arc::clone(&state);
    let tick_interval = config.tick_interval();
    tokio::spawn(async move {
        tick_task(tick_state, tick_interval).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /timer             - Configure mode, duration and warnings");
    info!("  POST /timer/control     - start | pause | stop | reset");
    info!("  POST /overlay           - Update overlay appearance and position");
    info!("  POST /overlay/move-mode - Toggle interactive repositioning");
    info!("  POST /overlay/drag      - Drag position from the display preview");
    info!("  POST /overlay/position  - Overlay window moved while in move mode");
    info!("  POST /cue               - Replace cue text");
    info!("  POST /cue/blink         - Toggle cue blinking");
    info!("  GET  /displays          - Available displays");
    info!("  GET  /state             - Current overlay and timer");
    info!("  GET  /events            - Server-sent state:sync, timer:tick, cue:update");
    info!("  GET  /health            - Health check");

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

    info!("Server shutdown complete");
    Ok(())
}
