//! JSON file persistence for the state document

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde_json::Value;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use super::migrate::{
    merge_section, normalize_overlay, normalize_timer, LEGACY_OVERLAY_KEYS, LEGACY_TIMER_KEYS,
};
use crate::state::{OverlayState, StateDocument, TimerState};

/// Reads and writes the persisted state document
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the document, falling back to defaults for anything missing or
    /// unreadable. Never fails.
    pub fn load(&self) -> StateDocument {
        let raw = match self.read_raw() {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                info!("No saved state at {}, starting fresh", self.path.display());
                Value::Null
            }
            Err(e) => {
                warn!("Ignoring unreadable state file: {:#}", e);
                Value::Null
            }
        };

        let mut doc = StateDocument {
            timer: merge_section(TimerState::new(), raw.get("timer"), LEGACY_TIMER_KEYS),
            overlay: merge_section(OverlayState::new(), raw.get("overlay"), LEGACY_OVERLAY_KEYS),
        };
        normalize_timer(&mut doc.timer);
        normalize_overlay(&mut doc.overlay);
        doc
    }

    /// Persist the document. Failures are logged and swallowed; the next
    /// mutation retries naturally.
    pub fn save(&self, doc: &StateDocument) {
        match self.write(doc) {
            Ok(()) => debug!("State saved to {}", self.path.display()),
            Err(e) => warn!("Failed to save state: {:#}", e),
        }
    }

    fn read_raw(&self) -> Result<Option<Value>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let value = serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON in {}", self.path.display()))?;
        Ok(Some(value))
    }

    fn write(&self, doc: &StateDocument) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
        let json = serde_json::to_string_pretty(doc).context("Failed to serialize state")?;

        // Unique sibling file, synced, then atomically moved over the document
        let mut tmp = NamedTempFile::new_in(dir)
            .with_context(|| format!("Failed to create temp file in {}", dir.display()))?;
        tmp.write_all(json.as_bytes()).context("Failed to write state")?;
        tmp.as_file().sync_all().context("Failed to sync state")?;
        tmp.persist(&self.path)
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;
        Ok(())
    }
}
