//! Drag-to-reposition coordinate math
//!
//! The control surface shows a scaled-down preview of the target display.
//! A point on that preview is mapped back to real screen coordinates here;
//! mouse capture itself lives in the UI.

use chrono::{DateTime, Duration, Utc};

use super::bounds::clamp_axis;
use super::{Rect, Size};
use crate::constants::layout::FRAME_MS;

/// Proportional stand-in for a display's work area
#[derive(Debug, Clone, Copy)]
pub struct DragSurface {
    pub work_area: Rect,
    /// Overlay size being placed
    pub overlay: Size,
}

impl DragSurface {
    pub fn new(work_area: Rect, overlay: Size) -> Self {
        Self { work_area, overlay }
    }

    /// Map a normalized preview position (`0.0..=1.0` on both axes) to the
    /// overlay's top-left corner in screen coordinates.
    pub fn to_screen(&self, nx: f64, ny: f64) -> (i32, i32) {
        let wa = &self.work_area;
        let free_x = f64::from(wa.width.saturating_sub(self.overlay.width));
        let free_y = f64::from(wa.height.saturating_sub(self.overlay.height));

        let nx = if nx.is_finite() { nx.clamp(0.0, 1.0) } else { 0.0 };
        let ny = if ny.is_finite() { ny.clamp(0.0, 1.0) } else { 0.0 };

        let x = wa.x.saturating_add((nx * free_x).round() as i32);
        let y = wa.y.saturating_add((ny * free_y).round() as i32);
        (
            clamp_axis(x, wa.x, wa.width, self.overlay.width),
            clamp_axis(y, wa.y, wa.height, self.overlay.height),
        )
    }
}

/// Limits position commits to one per animation frame.
///
/// Positions offered too soon are parked; the newest parked position is
/// released by [`CommitThrottle::flush`] once the frame has passed.
#[derive(Debug, Default)]
pub struct CommitThrottle {
    last_commit: Option<DateTime<Utc>>,
    pending: Option<(i32, i32)>,
}

impl CommitThrottle {
    pub fn new() -> Self {
        Self::default()
    }

    fn frame_elapsed(&self, now: DateTime<Utc>) -> bool {
        match self.last_commit {
            Some(last) => now - last >= Duration::milliseconds(FRAME_MS) || now < last,
            None => true,
        }
    }

    /// Offer a position; returns it if it may be committed right now.
    pub fn offer(&mut self, now: DateTime<Utc>, position: (i32, i32)) -> Option<(i32, i32)> {
        if self.frame_elapsed(now) {
            self.pending = None;
            self.last_commit = Some(now);
            Some(position)
        } else {
            self.pending = Some(position);
            None
        }
    }

    /// Release the parked position if its frame has passed.
    pub fn flush(&mut self, now: DateTime<Utc>) -> Option<(i32, i32)> {
        if self.pending.is_some() && self.frame_elapsed(now) {
            self.last_commit = Some(now);
            self.pending.take()
        } else {
            None
        }
    }

    /// Drop the parked position; it must never land after the drag ended.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}
