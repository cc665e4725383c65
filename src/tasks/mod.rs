//! Background tasks module
//!
//! The tick driver is the only autonomous activity; everything else is
//! command-triggered. Time comes from a [`Clock`] so tests can step it.

pub mod clock;
pub mod tick_driver;

// Re-export main types
pub use clock::{Clock, ManualClock, SystemClock};
pub use tick_driver::tick_task;
