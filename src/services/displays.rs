//! Display geometry as reported by the OS

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::layout::Rect;

/// A physical display; read-only, queried fresh on demand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayDescriptor {
    pub id: u64,
    #[serde(default)]
    pub label: String,
    pub bounds: Rect,
    /// Usable area excluding taskbars and menu bars
    pub work_area: Rect,
    #[serde(default)]
    pub is_primary: bool,
}

impl DisplayDescriptor {
    /// Human-readable name, falling back to the id
    pub fn name(&self) -> String {
        if self.label.is_empty() {
            self.id.to_string()
        } else {
            self.label.clone()
        }
    }
}

/// Source of the live display list
pub trait DisplayProvider: Send {
    fn displays(&self) -> Vec<DisplayDescriptor>;
}

/// Fixed display list, loaded once at startup
#[derive(Debug, Clone)]
pub struct StaticDisplays {
    displays: Vec<DisplayDescriptor>,
}

impl StaticDisplays {
    pub fn new(displays: Vec<DisplayDescriptor>) -> Self {
        Self { displays }
    }

    /// One 1920x1080 primary display
    pub fn single_primary() -> Self {
        let area = Rect::new(0, 0, 1920, 1080);
        Self::new(vec![DisplayDescriptor {
            id: 1,
            label: "Primary".to_string(),
            bounds: area,
            work_area: area,
            is_primary: true,
        }])
    }
}

impl DisplayProvider for StaticDisplays {
    fn displays(&self) -> Vec<DisplayDescriptor> {
        self.displays.clone()
    }
}

/// Read a JSON array of display descriptors
pub fn load_displays(path: &Path) -> Result<Vec<DisplayDescriptor>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read display file {}", path.display()))?;
    let displays: Vec<DisplayDescriptor> = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid display file {}", path.display()))?;
    info!("Loaded {} display(s) from {}", displays.len(), path.display());
    Ok(displays)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_displays() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"id": 7, "label": "Built-in", "isPrimary": true,
                  "bounds": {{"x": 0, "y": 0, "width": 1440, "height": 900}},
                  "workArea": {{"x": 0, "y": 25, "width": 1440, "height": 875}}}},
                {{"id": 9,
                  "bounds": {{"x": 1440, "y": 0, "width": 1920, "height": 1080}},
                  "workArea": {{"x": 1440, "y": 0, "width": 1920, "height": 1080}}}}
            ]"#
        )
        .unwrap();

        let displays = load_displays(file.path()).unwrap();
        assert_eq!(displays.len(), 2);
        assert!(displays[0].is_primary);
        assert_eq!(displays[0].work_area.y, 25);
        assert_eq!(displays[1].name(), "9");
        assert!(!displays[1].is_primary);
    }

    #[test]
    fn test_load_displays_missing_file() {
        assert!(load_displays(Path::new("/nonexistent/displays.json")).is_err());
    }
}
