//! Application-wide constants
//!
//! Ranges, layout heuristics and defaults shared by the engine, the layout
//! code and the command router.

/// Timer value ranges
pub mod timer {
    /// Largest configurable start value (23:59:59)
    pub const MAX_START_SECONDS: u32 = 24 * 3600 - 1;

    /// Largest warning threshold in minutes
    pub const MAX_WARN_MINUTES: u32 = 999;

    /// Color shown once a countdown reaches zero, regardless of warn toggles
    pub const EXPIRED_COLOR: &str = "#FF3B30";

    pub const DEFAULT_START_SECONDS: u32 = 5 * 60;
    pub const DEFAULT_WARN1_MINUTES: u32 = 10;
    pub const DEFAULT_WARN2_MINUTES: u32 = 5;
    pub const DEFAULT_WARN1_COLOR: &str = "#FFE900";
    pub const DEFAULT_WARN2_COLOR: &str = "#F55700";
}

/// Overlay window ranges and defaults
pub mod overlay {
    pub const MIN_WIDTH: u32 = 200;
    pub const MAX_WIDTH: u32 = 4000;
    pub const MIN_HEIGHT: u32 = 80;
    pub const MAX_HEIGHT: u32 = 2000;

    pub const MIN_FONT_SIZE: u32 = 10;
    pub const MAX_FONT_SIZE: u32 = 400;

    /// Explicit coordinates are kept within this range before work-area clamping
    pub const COORD_LIMIT: i32 = 100_000;

    /// Longest accepted font family string (in chars)
    pub const MAX_FONT_FAMILY_CHARS: usize = 128;

    pub const DEFAULT_WIDTH: u32 = 800;
    pub const DEFAULT_HEIGHT: u32 = 220;
    pub const DEFAULT_FONT_SIZE: u32 = 120;
    pub const DEFAULT_COLOR: &str = "#FFFFFF";
    pub const DEFAULT_FONT_FAMILY: &str = "Segoe UI, system-ui, -apple-system, sans-serif";
}

/// Auto-size heuristics (pixel and em values)
pub mod layout {
    /// Horizontal padding around the content
    pub const PAD_X: f64 = 48.0;
    /// Gap between stacked blocks
    pub const GAP: f64 = 8.0;
    /// Vertical padding around the content
    pub const PAD_Y: f64 = 24.0;

    /// Timer width in em for `HH:MM:SS`
    pub const TIMER_EM_HMS: f64 = 4.10;
    /// Timer width in em for the long minutes/seconds form
    pub const TIMER_EM_MSS: f64 = 6.75;

    /// Width cap relative to the timer footprint
    pub const MAX_WIDTH_FACTOR: f64 = 1.5;

    pub const EM_WHITESPACE: f64 = 0.30;
    pub const EM_ASCII: f64 = 0.55;
    pub const EM_WIDE: f64 = 1.00;

    /// Cue text size relative to the timer font size
    pub const CUE_SIZE_RATIO: f64 = 0.42;
    pub const CUE_MIN_SIZE: f64 = 12.0;

    /// Clock text size relative to the timer font size
    pub const CLOCK_SIZE_RATIO: f64 = 0.27;
    pub const CLOCK_MIN_SIZE: f64 = 10.0;

    pub const LINE_HEIGHT: f64 = 1.2;

    /// Progress bar thickness (down mode only)
    pub const PROGRESS_BAR_HEIGHT: f64 = 6.0;

    /// Inset from the work-area corner when auto-placing
    pub const MARGIN_X: i32 = 24;
    pub const MARGIN_Y: i32 = 24;

    /// Minimum spacing between two drag commits (one animation frame)
    pub const FRAME_MS: i64 = 16;
}
