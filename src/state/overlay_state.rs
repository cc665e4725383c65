//! Overlay window settings

use serde::{Deserialize, Serialize};

use crate::constants::overlay::*;

/// Overlay appearance, placement and cue content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayState {
    /// Display the overlay is rendered on, resolved on every layout pass
    pub target_display_id: Option<u64>,
    /// Derived by the auto-size pass unless the sizing policy is manual
    pub width: u32,
    pub height: u32,
    /// `None` means auto-place; a value is an explicit override
    pub x: Option<i32>,
    pub y: Option<i32>,
    /// Overlay accepts pointer input and can be dragged; never survives a restart
    pub move_mode_enabled: bool,
    pub font_family: String,
    pub font_size_px: u32,
    pub color_hex: String,
    pub show_timer: bool,
    pub show_clock: bool,
    pub cue_text: String,
    pub cue_blink_enabled: bool,
}

impl OverlayState {
    pub fn new() -> Self {
        Self {
            target_display_id: None,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            x: None,
            y: None,
            move_mode_enabled: false,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_size_px: DEFAULT_FONT_SIZE,
            color_hex: DEFAULT_COLOR.to_string(),
            show_timer: true,
            show_clock: false,
            cue_text: String::new(),
            cue_blink_enabled: false,
        }
    }

    /// Whether placement is automatic (either coordinate missing)
    pub fn is_auto_placed(&self) -> bool {
        self.x.is_none() || self.y.is_none()
    }

    /// Drop any explicit position so the next layout pass auto-places
    pub fn clear_position(&mut self) {
        self.x = None;
        self.y = None;
    }
}

impl Default for OverlayState {
    fn default() -> Self {
        Self::new()
    }
}
