//! Shared application state for the async shell

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Instant,
};
use tracing::debug;

use crate::{
    commands::Command,
    controller::Controller,
    sync::{ChannelId, DisplayInfo, OutputChannel, StateSnapshot},
    tasks::Clock,
};

/// Wraps the [`Controller`] so handlers and the tick driver take turns.
///
/// Every method holds the lock for one whole mutation and never across an
/// `.await`.
pub struct AppState {
    pub controller: Mutex<Controller>,
    pub clock: Arc<dyn Clock>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
}

impl AppState {
    pub fn new(controller: Controller, clock: Arc<dyn Clock>, port: u16, host: String) -> Self {
        Self {
            controller: Mutex::new(controller),
            clock,
            start_time: Instant::now(),
            port,
            host,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Controller>, String> {
        self.controller
            .lock()
            .map_err(|e| format!("Failed to lock controller: {}", e))
    }

    /// Apply a command at the current clock time
    pub fn dispatch(&self, command: Command) -> Result<(), String> {
        let now = self.clock.now();
        self.lock()?.handle(command, now);
        Ok(())
    }

    /// Advance the timer to the current clock time
    pub fn tick(&self) -> Result<(), String> {
        let now = self.clock.now();
        self.lock()?.tick(now);
        Ok(())
    }

    pub fn get_state(&self) -> Result<StateSnapshot, String> {
        self.lock().map(|controller| controller.snapshot())
    }

    pub fn get_displays(&self) -> Result<Vec<DisplayInfo>, String> {
        let displays = self.lock()?.displays();
        Ok(displays.iter().map(DisplayInfo::from).collect())
    }

    pub fn register_channel(&self, channel: Box<dyn OutputChannel>) -> Result<ChannelId, String> {
        self.lock().map(|mut controller| controller.register_channel(channel))
    }

    pub fn deregister_channel(&self, id: ChannelId) -> Result<bool, String> {
        let removed = self.lock()?.deregister_channel(id);
        debug!("Channel {} deregister requested (removed: {})", id, removed);
        Ok(removed)
    }

    pub fn channel_count(&self) -> Result<usize, String> {
        self.lock().map(|controller| controller.channel_count())
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let secs = self.start_time.elapsed().as_secs();
        let (hours, minutes, seconds) = (secs / 3600, (secs % 3600) / 60, secs % 60);

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}
