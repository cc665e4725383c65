//! Utility functions module
//!
//! This module contains utility functions used throughout the application.

pub mod signals;
pub mod validation;

// Re-export main functions
pub use signals::shutdown_signal;
pub use validation::{coerce_bool, coerce_int, normalize_hex_color};
