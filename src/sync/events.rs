//! Outbound event payloads

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::layout::Rect;
use crate::services::DisplayDescriptor;
use crate::state::{DisplayMode, OverlayState, StateDocument, TimerMode, TimerState};
use crate::timer::{compute_warn_color, format_elapsed, format_elapsed_markup};

/// Derived timer view sent with every tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerPayload {
    pub mode: TimerMode,
    pub display_mode: DisplayMode,
    pub warn1_enabled: bool,
    pub warn2_enabled: bool,
    pub warn1_threshold_minutes: u32,
    pub warn2_threshold_minutes: u32,
    pub warn1_color: String,
    pub warn2_color: String,
    pub start_seconds: u32,
    pub elapsed_display: i64,
    pub running: bool,
    pub paused: bool,
    pub formatted_text: String,
    pub formatted_markup: Option<String>,
    /// Color the timer should currently be drawn in
    pub color: String,
}

impl TimerPayload {
    pub fn new(timer: &TimerState, base_color: &str) -> Self {
        Self {
            mode: timer.mode,
            display_mode: timer.display_mode,
            warn1_enabled: timer.warn1_enabled,
            warn2_enabled: timer.warn2_enabled,
            warn1_threshold_minutes: timer.warn1_threshold_minutes,
            warn2_threshold_minutes: timer.warn2_threshold_minutes,
            warn1_color: timer.warn1_color.clone(),
            warn2_color: timer.warn2_color.clone(),
            start_seconds: timer.start_seconds,
            elapsed_display: timer.elapsed_display,
            running: timer.running,
            paused: timer.paused,
            formatted_text: format_elapsed(timer),
            formatted_markup: format_elapsed_markup(timer),
            color: compute_warn_color(timer, base_color).to_string(),
        }
    }

    pub fn from_document(doc: &StateDocument) -> Self {
        Self::new(&doc.timer, &doc.overlay.color_hex)
    }
}

/// Display descriptor as shown to windows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayInfo {
    pub id: u64,
    pub name: String,
    pub bounds: Rect,
    pub work_area: Rect,
    pub is_primary: bool,
}

impl From<&DisplayDescriptor> for DisplayInfo {
    fn from(d: &DisplayDescriptor) -> Self {
        Self {
            id: d.id,
            name: d.name(),
            bounds: d.bounds,
            work_area: d.work_area,
            is_primary: d.is_primary,
        }
    }
}

/// Complete snapshot sent after any configuration change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullSyncPayload {
    pub overlay: OverlayState,
    pub timer: TimerPayload,
    pub displays: Vec<DisplayInfo>,
    /// Resolved overlay rectangle, `None` when no display is known
    pub bounds: Option<Rect>,
}

/// Current `{overlay, timer}` view returned by get-state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub overlay: OverlayState,
    pub timer: TimerPayload,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuePayload {
    pub text: String,
}

/// Everything the core pushes to windows
#[derive(Debug, Clone, PartialEq)]
pub enum OutboundEvent {
    StateSync(FullSyncPayload),
    TimerTick(TimerPayload),
    CueUpdate(CuePayload),
}

impl OutboundEvent {
    pub fn event_name(&self) -> &'static str {
        match self {
            OutboundEvent::StateSync(_) => "state:sync",
            OutboundEvent::TimerTick(_) => "timer:tick",
            OutboundEvent::CueUpdate(_) => "cue:update",
        }
    }

    pub fn payload(&self) -> Value {
        let value = match self {
            OutboundEvent::StateSync(p) => serde_json::to_value(p),
            OutboundEvent::TimerTick(p) => serde_json::to_value(p),
            OutboundEvent::CueUpdate(p) => serde_json::to_value(p),
        };
        value.unwrap_or(Value::Null)
    }
}
