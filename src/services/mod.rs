//! External collaborators
//!
//! The core never talks to the OS directly; display geometry comes in
//! through the [`DisplayProvider`] seam.

pub mod displays;

// Re-export main types
pub use displays::{load_displays, DisplayDescriptor, DisplayProvider, StaticDisplays};
