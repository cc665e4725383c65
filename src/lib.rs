//! Stage Timer - A state-managed presentation timer with an overlay display
//!
//! This library owns the authoritative timer/overlay state, advances the
//! clock, computes overlay geometry and pushes derived state to every
//! connected window.

pub mod config;
pub mod constants;
pub mod state;
pub mod timer;
pub mod layout;
pub mod store;
pub mod sync;
pub mod commands;
pub mod controller;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use controller::Controller;
pub use state::AppState;
pub use api::create_router;
pub use utils::signals::shutdown_signal;
