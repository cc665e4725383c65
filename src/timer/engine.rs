//! Timer state machine and tick advance
//!
//! States are STOPPED (`running == false`), RUNNING and PAUSED
//! (`running && paused`). Elapsed time is accumulated from wall-clock
//! deltas between ticks, so a late or skipped tick never loses time.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::config::{OverrunPolicy, ResetPolicy};
use crate::state::{RunState, TimerMode, TimerState};

impl TimerState {
    /// STOPPED|PAUSED → RUNNING. Returns false if already running.
    ///
    /// An exhausted countdown is re-armed to its start value first.
    pub fn start(&mut self, now: DateTime<Utc>) -> bool {
        if self.run_state() == RunState::Running {
            return false;
        }
        if self.mode == TimerMode::Down && self.elapsed_display == 0 && self.start_seconds > 0 {
            debug!("Re-arming exhausted countdown to {}s", self.start_seconds);
            self.rewind();
        }
        self.running = true;
        self.paused = false;
        self.last_tick_timestamp = Some(now);
        true
    }

    /// RUNNING → PAUSED. Returns false if not running.
    pub fn pause(&mut self) -> bool {
        if self.run_state() != RunState::Running {
            return false;
        }
        self.paused = true;
        self.last_tick_timestamp = None;
        true
    }

    /// Any state → STOPPED
    pub fn stop(&mut self) {
        self.running = false;
        self.paused = false;
        self.last_tick_timestamp = None;
    }

    /// Put the value back on the start value.
    pub fn reset(&mut self, now: DateTime<Utc>, policy: ResetPolicy) {
        let previous = self.run_state();
        self.rewind();

        match (policy, previous) {
            (ResetPolicy::ForceStop, _) | (_, RunState::Stopped) => self.stop(),
            (ResetPolicy::PreserveRunState, RunState::Paused) => {
                self.last_tick_timestamp = None;
            }
            (ResetPolicy::PreserveRunState, RunState::Running) => {
                self.last_tick_timestamp = Some(now);
            }
        }
    }

    /// Advance the counter to `now`. Returns true when the value moved.
    pub fn tick(&mut self, now: DateTime<Utc>, overrun: OverrunPolicy) -> bool {
        if self.run_state() != RunState::Running {
            return false;
        }

        let Some(last) = self.last_tick_timestamp else {
            // First tick after resume only records the timestamp
            self.last_tick_timestamp = Some(now);
            return false;
        };

        let dt = match (now - last).num_microseconds() {
            Some(us) if us > 0 => us as f64 / 1_000_000.0,
            _ => return false,
        };
        self.last_tick_timestamp = Some(now);

        match self.mode {
            TimerMode::Up => {
                self.elapsed_precise += dt;
                self.elapsed_display = self.elapsed_precise.max(0.0).floor() as i64;
            }
            TimerMode::Down => {
                self.elapsed_precise -= dt;
                if overrun == OverrunPolicy::ClampAtZero && self.elapsed_precise <= 0.0 {
                    self.elapsed_precise = 0.0;
                    self.elapsed_display = 0;
                    self.stop();
                    debug!("Countdown reached zero, stopping");
                } else {
                    self.elapsed_display = self.elapsed_precise.ceil() as i64;
                }
            }
        }
        true
    }
}
