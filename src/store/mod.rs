//! Durable state storage
//!
//! Loading never fails: a missing or unreadable document is a first run.
//! Saving is best-effort and never interrupts the timer.

pub mod migrate;
pub mod state_store;

pub use state_store::StateStore;
