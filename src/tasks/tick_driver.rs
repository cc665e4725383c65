//! Periodic timer advance

use std::{sync::Arc, time::Duration};

use tokio::time::{interval, MissedTickBehavior};
use tracing::{info, warn};

use crate::state::AppState;

/// Tick the controller every `period` until the task is dropped.
///
/// Elapsed time is taken from the clock, not from the number of ticks, so a
/// late or skipped tick only delays the display, it never loses time.
pub async fn tick_task(state: Arc<AppState>, period: Duration) {
    info!("Starting tick driver every {:?}", period);

    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;
        if let Err(e) = state.tick() {
            warn!("Tick failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{Command, ControlAction, ControlRequest};
    use crate::config::Policies;
    use crate::services::StaticDisplays;
    use crate::store::StateStore;
    use crate::tasks::ManualClock;
    use crate::Controller;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    #[tokio::test(start_paused = true)]
    async fn test_tick_task_uses_clock_deltas() {
        let dir = TempDir::new().unwrap();
        let controller = Controller::new(
            StateStore::new(dir.path().join("state.json")),
            Box::new(StaticDisplays::single_primary()),
            Policies::default(),
        );
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap());
        let state = Arc::new(AppState::new(
            controller,
            Arc::new(clock.clone()),
            20554,
            "127.0.0.1".to_string(),
        ));

        state
            .dispatch(Command::Control(ControlRequest::new(ControlAction::Start)))
            .unwrap();
        let driver = tokio::spawn(tick_task(Arc::clone(&state), Duration::from_millis(200)));

        clock.advance(chrono::Duration::seconds(5));
        tokio::time::sleep(Duration::from_millis(450)).await;
        assert_eq!(state.get_state().unwrap().timer.elapsed_display, 295);

        clock.advance(chrono::Duration::milliseconds(1500));
        tokio::time::sleep(Duration::from_millis(450)).await;
        assert_eq!(state.get_state().unwrap().timer.elapsed_display, 294);

        driver.abort();
    }
}
