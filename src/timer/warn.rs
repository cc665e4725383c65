//! Warning color resolution for countdowns

use crate::constants::timer::EXPIRED_COLOR;
use crate::state::{TimerMode, TimerState};

/// Resolve the color the timer should be drawn in.
///
/// Only countdowns change color. Level 2 is the shorter threshold and is
/// checked first; an exhausted countdown always gets the expiry color.
pub fn compute_warn_color<'a>(state: &'a TimerState, base_color: &'a str) -> &'a str {
    if state.mode != TimerMode::Down {
        return base_color;
    }
    let remaining = state.elapsed_display;
    if remaining <= 0 {
        return EXPIRED_COLOR;
    }
    if !state.warn1_enabled && !state.warn2_enabled {
        return base_color;
    }
    if state.warn2_enabled && remaining <= i64::from(state.warn2_threshold_minutes) * 60 {
        return &state.warn2_color;
    }
    if state.warn1_enabled && remaining <= i64::from(state.warn1_threshold_minutes) * 60 {
        return &state.warn1_color;
    }
    base_color
}
