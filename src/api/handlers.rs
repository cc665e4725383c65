//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::error;

use crate::{
    commands::{
        Command, ControlRequest, CueBlinkRequest, CueTextRequest, DragRequest, MoveModeRequest,
        OverlayUpdate, PositionReport, TimerConfig,
    },
    state::AppState,
    sync::{DisplayInfo, StateSnapshot},
};
use super::responses::HealthResponse;

/// Hand a command to the controller; commands never fail on content
fn accept(state: &AppState, command: Command) -> StatusCode {
    let name = command.name();
    match state.dispatch(command) {
        Ok(()) => StatusCode::ACCEPTED,
        Err(e) => {
            error!("Failed to apply {}: {}", name, e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Handle POST /timer - configure-timer
pub async fn timer_handler(
    State(state): State<Arc<AppState>>,
    Json(config): Json<TimerConfig>,
) -> StatusCode {
    accept(&state, Command::ConfigureTimer(config))
}

/// Handle POST /timer/control - start, pause, stop or reset
pub async fn control_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ControlRequest>,
) -> StatusCode {
    accept(&state, Command::Control(request))
}

/// Handle POST /overlay - update-overlay
pub async fn overlay_handler(
    State(state): State<Arc<AppState>>,
    Json(update): Json<OverlayUpdate>,
) -> StatusCode {
    accept(&state, Command::UpdateOverlay(update))
}

pub async fn move_mode_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<MoveModeRequest>,
) -> StatusCode {
    accept(&state, Command::SetMoveMode(request))
}

/// Handle POST /overlay/drag - normalized preview position while dragging
pub async fn drag_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DragRequest>,
) -> StatusCode {
    accept(&state, Command::DragOverlay(request))
}

/// Handle POST /overlay/position - the overlay window was moved directly
pub async fn position_handler(
    State(state): State<Arc<AppState>>,
    Json(report): Json<PositionReport>,
) -> StatusCode {
    accept(&state, Command::ReportOverlayPosition(report))
}

pub async fn cue_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CueTextRequest>,
) -> StatusCode {
    accept(&state, Command::SetCueText(request))
}

pub async fn cue_blink_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CueBlinkRequest>,
) -> StatusCode {
    accept(&state, Command::SetCueBlink(request))
}

/// Handle GET /displays - live display list
pub async fn displays_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<DisplayInfo>>, StatusCode> {
    state.get_displays().map(Json).map_err(|e| {
        error!("Failed to get displays: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

/// Handle GET /state - current overlay and timer snapshot
pub async fn state_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StateSnapshot>, StatusCode> {
    state.get_state().map(Json).map_err(|e| {
        error!("Failed to get state: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let channels = state.channel_count().unwrap_or_default();
    Json(HealthResponse::ok(state.get_uptime(), channels))
}
