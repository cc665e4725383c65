//! Command payload structures

use std::str::FromStr;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Keeps an explicit `null` distinguishable from an absent field
fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// configure-timer
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TimerConfig {
    pub mode: Option<Value>,
    pub display_mode: Option<Value>,
    pub start_seconds: Option<Value>,
    pub warn1_enabled: Option<Value>,
    pub warn2_enabled: Option<Value>,
    pub warn1_threshold_minutes: Option<Value>,
    pub warn2_threshold_minutes: Option<Value>,
    pub warn1_color: Option<Value>,
    pub warn2_color: Option<Value>,
    // Older clients; the current key wins when both are sent
    #[serde(rename = "downDisplayMode")]
    legacy_display_mode: Option<Value>,
    #[serde(rename = "warn1Min")]
    legacy_warn1_minutes: Option<Value>,
    #[serde(rename = "warn2Min")]
    legacy_warn2_minutes: Option<Value>,
}

impl TimerConfig {
    /// Fill absent fields from their legacy spellings
    pub fn resolve_legacy(mut self) -> Self {
        self.display_mode = self.display_mode.or(self.legacy_display_mode.take());
        self.warn1_threshold_minutes =
            self.warn1_threshold_minutes.or(self.legacy_warn1_minutes.take());
        self.warn2_threshold_minutes =
            self.warn2_threshold_minutes.or(self.legacy_warn2_minutes.take());
        self
    }
}

/// Engine transitions the control surface can request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    Start,
    Pause,
    Stop,
    Reset,
}

impl FromStr for ControlAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(ControlAction::Start),
            "pause" => Ok(ControlAction::Pause),
            "stop" => Ok(ControlAction::Stop),
            "reset" => Ok(ControlAction::Reset),
            other => Err(format!("Unknown control action: {}", other)),
        }
    }
}

/// control-action
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ControlRequest {
    pub action: Option<Value>,
}

impl ControlRequest {
    pub fn new(action: ControlAction) -> Self {
        let name = match action {
            ControlAction::Start => "start",
            ControlAction::Pause => "pause",
            ControlAction::Stop => "stop",
            ControlAction::Reset => "reset",
        };
        Self {
            action: Some(Value::from(name)),
        }
    }

    /// The requested action, `None` for anything unrecognised
    pub fn action(&self) -> Option<ControlAction> {
        self.action.as_ref()?.as_str()?.parse().ok()
    }
}

/// update-overlay; every field optional, `x`/`y` accept an explicit null
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OverlayUpdate {
    pub display_id: Option<Value>,
    #[serde(deserialize_with = "deserialize_present")]
    pub x: Option<Value>,
    #[serde(deserialize_with = "deserialize_present")]
    pub y: Option<Value>,
    pub font_family: Option<Value>,
    pub font_size_px: Option<Value>,
    pub color: Option<Value>,
    pub show_timer: Option<Value>,
    pub show_clock: Option<Value>,
    pub cue_text: Option<Value>,
    /// Only honoured with the manual sizing policy
    pub width: Option<Value>,
    pub height: Option<Value>,
    #[serde(rename = "colorHex")]
    legacy_color: Option<Value>,
    #[serde(rename = "kanpeText")]
    legacy_cue_text: Option<Value>,
}

impl OverlayUpdate {
    /// Fill absent fields from their legacy spellings
    pub fn resolve_legacy(mut self) -> Self {
        self.color = self.color.or(self.legacy_color.take());
        self.cue_text = self.cue_text.or(self.legacy_cue_text.take());
        self
    }
}

/// set-move-mode
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MoveModeRequest {
    pub enabled: Option<Value>,
}

/// set-cue-text
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CueTextRequest {
    pub text: Option<Value>,
}

/// set-cue-blink
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CueBlinkRequest {
    pub enabled: Option<Value>,
}

/// drag-overlay: normalized position on the display preview
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DragRequest {
    pub nx: Option<Value>,
    pub ny: Option<Value>,
}

/// report-overlay-position: the overlay window was moved by the OS
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PositionReport {
    pub x: Option<Value>,
    pub y: Option<Value>,
}

/// Every mutation the core accepts
#[derive(Debug, Clone)]
pub enum Command {
    ConfigureTimer(TimerConfig),
    Control(ControlRequest),
    UpdateOverlay(OverlayUpdate),
    SetMoveMode(MoveModeRequest),
    SetCueText(CueTextRequest),
    SetCueBlink(CueBlinkRequest),
    DragOverlay(DragRequest),
    ReportOverlayPosition(PositionReport),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::ConfigureTimer(_) => "configure-timer",
            Command::Control(_) => "control-action",
            Command::UpdateOverlay(_) => "update-overlay",
            Command::SetMoveMode(_) => "set-move-mode",
            Command::SetCueText(_) => "set-cue-text",
            Command::SetCueBlink(_) => "set-cue-blink",
            Command::DragOverlay(_) => "drag-overlay",
            Command::ReportOverlayPosition(_) => "report-overlay-position",
        }
    }
}
