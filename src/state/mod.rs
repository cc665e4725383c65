//! State management module
//!
//! This module contains the timer and overlay state structures, the
//! persisted document that groups them, and the shared application state.

pub mod app_state;
pub mod document;
pub mod overlay_state;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use document::StateDocument;
pub use overlay_state::OverlayState;
pub use timer_state::{DisplayMode, RunState, TimerMode, TimerState};
