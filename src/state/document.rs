//! The persisted state document

use serde::{Deserialize, Serialize};

use super::{OverlayState, TimerState};

/// Everything that survives a restart: one timer and one overlay configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateDocument {
    pub timer: TimerState,
    pub overlay: OverlayState,
}
