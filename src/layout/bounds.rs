//! Overlay placement within a display work area

use super::Rect;
use crate::constants::layout::{MARGIN_X, MARGIN_Y};
use crate::constants::overlay::{MAX_HEIGHT, MAX_WIDTH, MIN_HEIGHT, MIN_WIDTH};
use crate::services::DisplayDescriptor;
use crate::state::OverlayState;

/// Pick the display the overlay belongs on.
///
/// Priority: the configured display > the first non-primary display
/// (presentation setups put the audience screen second) > the primary one.
pub fn resolve_target_display(
    displays: &[DisplayDescriptor],
    target_display_id: Option<u64>,
) -> Option<&DisplayDescriptor> {
    if let Some(id) = target_display_id {
        if let Some(display) = displays.iter().find(|d| d.id == id) {
            return Some(display);
        }
    }
    displays
        .iter()
        .find(|d| !d.is_primary)
        .or_else(|| displays.iter().find(|d| d.is_primary))
        .or_else(|| displays.first())
}

/// Keep `value` so that `[value, value + extent]` stays inside `[start, start + span]`.
/// When the extent is larger than the span the start edge wins.
pub(crate) fn clamp_axis(value: i32, start: i32, span: u32, extent: u32) -> i32 {
    let span = i32::try_from(span).unwrap_or(i32::MAX);
    let extent = i32::try_from(extent).unwrap_or(i32::MAX);
    let max = start.saturating_add(span).saturating_sub(extent);
    value.min(max).max(start)
}

/// Final overlay rectangle inside `work_area`.
///
/// Explicit coordinates are clamped independently; if either is missing the
/// overlay is auto-placed at the top-right corner with a fixed margin.
pub fn compute_bounds(overlay: &OverlayState, work_area: &Rect) -> Rect {
    let width = overlay.width.clamp(MIN_WIDTH, MAX_WIDTH);
    let height = overlay.height.clamp(MIN_HEIGHT, MAX_HEIGHT);

    let (x, y) = match (overlay.x, overlay.y) {
        (Some(x), Some(y)) => (x, y),
        _ => (
            work_area
                .right()
                .saturating_sub(width as i32)
                .saturating_sub(MARGIN_X),
            work_area.y.saturating_add(MARGIN_Y),
        ),
    };

    Rect {
        x: clamp_axis(x, work_area.x, work_area.width, width),
        y: clamp_axis(y, work_area.y, work_area.height, height),
        width,
        height,
    }
}
