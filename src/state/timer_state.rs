//! Timer state structure

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::timer::*;

/// Counting direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerMode {
    #[default]
    Down,
    Up,
}

/// How the value is rendered; `Mss` only takes effect in down mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Hms,
    Mss,
}

/// Life-cycle state derived from the `running`/`paused` flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Stopped,
    Running,
    Paused,
}

/// Timer configuration and live counter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    pub mode: TimerMode,
    pub display_mode: DisplayMode,
    /// Configured duration (down) or start point (up)
    pub start_seconds: u32,
    /// High-precision accumulator; negative in down mode on overrun
    pub elapsed_precise: f64,
    /// Rendered value: floor of the accumulator in up mode, ceil in down mode
    pub elapsed_display: i64,
    pub running: bool,
    pub paused: bool,
    /// Wall-clock time of the last applied tick, `None` while not accumulating
    pub last_tick_timestamp: Option<DateTime<Utc>>,
    pub warn1_enabled: bool,
    pub warn2_enabled: bool,
    pub warn1_threshold_minutes: u32,
    pub warn2_threshold_minutes: u32,
    pub warn1_color: String,
    pub warn2_color: String,
}

impl TimerState {
    /// Create a stopped five-minute countdown with both warnings on
    pub fn new() -> Self {
        Self {
            mode: TimerMode::Down,
            display_mode: DisplayMode::Hms,
            start_seconds: DEFAULT_START_SECONDS,
            elapsed_precise: DEFAULT_START_SECONDS as f64,
            elapsed_display: DEFAULT_START_SECONDS as i64,
            running: false,
            paused: false,
            last_tick_timestamp: None,
            warn1_enabled: true,
            warn2_enabled: true,
            warn1_threshold_minutes: DEFAULT_WARN1_MINUTES,
            warn2_threshold_minutes: DEFAULT_WARN2_MINUTES,
            warn1_color: DEFAULT_WARN1_COLOR.to_string(),
            warn2_color: DEFAULT_WARN2_COLOR.to_string(),
        }
    }

    pub fn run_state(&self) -> RunState {
        match (self.running, self.paused) {
            (false, _) => RunState::Stopped,
            (true, false) => RunState::Running,
            (true, true) => RunState::Paused,
        }
    }

    /// True when the long minutes/seconds form is rendered
    pub fn uses_mss(&self) -> bool {
        self.mode == TimerMode::Down && self.display_mode == DisplayMode::Mss
    }

    /// Put the counter back on the configured start value
    pub fn rewind(&mut self) {
        self.elapsed_precise = self.start_seconds as f64;
        self.elapsed_display = self.start_seconds as i64;
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}
