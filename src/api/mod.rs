//! HTTP API module
//!
//! Commands arrive as JSON `POST`s, queries as `GET`s, and every open
//! `GET /events` stream is one output channel.

pub mod events;
pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use events::events_handler;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/timer", post(timer_handler))
        .route("/timer/control", post(control_handler))
        .route("/overlay", post(overlay_handler))
        .route("/overlay/move-mode", post(move_mode_handler))
        .route("/overlay/drag", post(drag_handler))
        .route("/overlay/position", post(position_handler))
        .route("/cue", post(cue_handler))
        .route("/cue/blink", post(cue_blink_handler))
        .route("/displays", get(displays_handler))
        .route("/state", get(state_handler))
        .route("/events", get(events_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
