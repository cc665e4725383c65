//! Configuration and CLI argument handling

use std::{path::PathBuf, time::Duration};

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

/// What `reset` does to the run state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResetPolicy {
    /// Reset the value only; a running timer keeps running, a paused one stays paused
    #[default]
    PreserveRunState,
    /// Reset always ends in the stopped state
    ForceStop,
}

/// What a countdown does once it passes zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverrunPolicy {
    /// Keep counting into negative values
    #[default]
    AllowNegative,
    /// Pin the value to zero and stop
    ClampAtZero,
}

/// Whether overlay width/height are derived from content or user-settable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SizingPolicy {
    #[default]
    Derived,
    Manual,
}

/// Product behaviour flags, resolved once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Policies {
    pub reset: ResetPolicy,
    pub overrun: OverrunPolicy,
    pub sizing: SizingPolicy,
}

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "stage-timer")]
#[command(about = "A state-managed presentation timer server driving a click-through overlay")]
#[command(version = "1.0.0")]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Path of the persisted state document
    #[arg(long)]
    pub state_file: Option<PathBuf>,

    /// JSON file describing the available displays
    #[arg(long)]
    pub displays: Option<PathBuf>,

    /// Tick interval in milliseconds
    #[arg(long, default_value = "200")]
    pub tick_ms: u64,

    #[arg(long, value_enum, default_value_t = ResetPolicy::PreserveRunState)]
    pub reset_policy: ResetPolicy,

    #[arg(long, value_enum, default_value_t = OverrunPolicy::AllowNegative)]
    pub overrun_policy: OverrunPolicy,

    #[arg(long, value_enum, default_value_t = SizingPolicy::Derived)]
    pub sizing_policy: SizingPolicy,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Tick interval, kept within [10ms, 1s]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms.clamp(10, 1000))
    }

    /// Resolve the state file, defaulting to the user config directory
    pub fn state_path(&self) -> PathBuf {
        self.state_file.clone().unwrap_or_else(|| {
            let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
            path.push("stage-timer");
            path.push("state.json");
            path
        })
    }

    pub fn policies(&self) -> Policies {
        Policies {
            reset: self.reset_policy,
            overrun: self.overrun_policy,
            sizing: self.sizing_policy,
        }
    }
}
