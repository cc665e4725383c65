//! Inbound commands from the control surface
//!
//! Payload fields are kept as raw JSON values so each one can be clamped or
//! ignored on its own; a bad field never rejects the whole command.

pub mod payloads;
pub mod router;

pub use payloads::{
    Command, ControlAction, ControlRequest, CueBlinkRequest, CueTextRequest, DragRequest,
    MoveModeRequest, OverlayUpdate, PositionReport, TimerConfig,
};
