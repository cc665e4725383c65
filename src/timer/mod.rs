//! Timer engine: state transitions, tick advance, display formatting and
//! warning-color resolution.

pub mod engine;
pub mod format;
pub mod warn;

pub use format::{format_elapsed, format_elapsed_markup};
pub use warn::compute_warn_color;
