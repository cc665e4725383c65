//! Merging persisted sections onto defaults and upgrading old documents

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::constants::overlay::*;
use crate::constants::timer::*;
use crate::state::{OverlayState, TimerMode, TimerState};
use crate::utils::validation::{normalize_hex_color, truncate_chars};

/// Old timer keys and their current names
pub const LEGACY_TIMER_KEYS: &[(&str, &str)] = &[
    ("downDisplayMode", "displayMode"),
    ("warn1Min", "warn1ThresholdMinutes"),
    ("warn2Min", "warn2ThresholdMinutes"),
    ("currentSecondsPrecise", "elapsedPrecise"),
    ("currentSeconds", "elapsedDisplay"),
    ("lastTickMs", "lastTickTimestamp"),
];

/// Old overlay keys and their current names
pub const LEGACY_OVERLAY_KEYS: &[(&str, &str)] = &[
    ("displayId", "targetDisplayId"),
    ("moveMode", "moveModeEnabled"),
    ("color", "colorHex"),
    ("kanpeText", "cueText"),
];

const FONT_STACK_SUFFIX: &str = ", system-ui, -apple-system, sans-serif";

/// Expand the short family names older versions stored into font stacks
pub fn normalize_font_family(family: &str) -> String {
    match family {
        "" | "Segoe UI" => DEFAULT_FONT_FAMILY.to_string(),
        "Inter" | "Roboto" | "Montserrat" | "Oswald" => format!("{family}{FONT_STACK_SUFFIX}"),
        "Noto Sans JP" => format!("\"Noto Sans JP\"{FONT_STACK_SUFFIX}"),
        other => other.to_string(),
    }
}

fn canonical_key<'a>(legacy: &[(&str, &'a str)], key: &str) -> Option<&'a str> {
    legacy.iter().find(|(old, _)| *old == key).map(|(_, new)| *new)
}

/// Shallow-merge a persisted section onto `defaults`, field by field.
///
/// Legacy keys are renamed first (a current key wins over its legacy
/// alias), unknown keys are dropped, and a field whose value does not fit
/// its type keeps the default.
pub fn merge_section<T>(defaults: T, persisted: Option<&Value>, legacy: &[(&str, &str)]) -> T
where
    T: Serialize + DeserializeOwned,
{
    let Some(Value::Object(persisted)) = persisted else {
        return defaults;
    };
    let Ok(Value::Object(mut merged)) = serde_json::to_value(&defaults) else {
        return defaults;
    };

    let (legacy_fields, current_fields): (Vec<_>, Vec<_>) = persisted
        .iter()
        .partition(|(key, _)| canonical_key(legacy, key).is_some());

    let mut result = defaults;
    for (key, value) in legacy_fields.into_iter().chain(current_fields) {
        let target = canonical_key(legacy, key).unwrap_or(key.as_str());
        if !merged.contains_key(target) {
            debug!("Ignoring unknown persisted field '{}'", key);
            continue;
        }

        let mut candidate: Map<String, Value> = merged.clone();
        candidate.insert(target.to_string(), value.clone());
        match serde_json::from_value::<T>(Value::Object(candidate.clone())) {
            Ok(parsed) => {
                merged = candidate;
                result = parsed;
            }
            Err(e) => warn!("Ignoring persisted field '{}': {}", key, e),
        }
    }
    result
}

/// Re-establish timer invariants after loading
pub fn normalize_timer(timer: &mut TimerState) {
    timer.start_seconds = timer.start_seconds.min(MAX_START_SECONDS);
    timer.warn1_threshold_minutes = timer.warn1_threshold_minutes.min(MAX_WARN_MINUTES);
    timer.warn2_threshold_minutes = timer.warn2_threshold_minutes.min(MAX_WARN_MINUTES);
    timer.warn1_color =
        normalize_hex_color(&timer.warn1_color).unwrap_or_else(|| DEFAULT_WARN1_COLOR.to_string());
    timer.warn2_color =
        normalize_hex_color(&timer.warn2_color).unwrap_or_else(|| DEFAULT_WARN2_COLOR.to_string());

    if !timer.elapsed_precise.is_finite() {
        timer.elapsed_precise = timer.start_seconds as f64;
    }
    timer.elapsed_display = match timer.mode {
        TimerMode::Up => timer.elapsed_precise.max(0.0).floor() as i64,
        TimerMode::Down => timer.elapsed_precise.ceil() as i64,
    };

    if timer.paused && !timer.running {
        timer.paused = false;
    }
    // Meaningless across restarts; the first tick re-arms it
    timer.last_tick_timestamp = None;
}

/// Re-establish overlay invariants after loading
pub fn normalize_overlay(overlay: &mut OverlayState) {
    overlay.font_family =
        truncate_chars(&normalize_font_family(&overlay.font_family), MAX_FONT_FAMILY_CHARS);
    overlay.font_size_px = overlay.font_size_px.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
    overlay.width = overlay.width.clamp(MIN_WIDTH, MAX_WIDTH);
    overlay.height = overlay.height.clamp(MIN_HEIGHT, MAX_HEIGHT);
    overlay.x = overlay.x.map(|x| x.clamp(-COORD_LIMIT, COORD_LIMIT));
    overlay.y = overlay.y.map(|y| y.clamp(-COORD_LIMIT, COORD_LIMIT));
    overlay.color_hex =
        normalize_hex_color(&overlay.color_hex).unwrap_or_else(|| DEFAULT_COLOR.to_string());
    // Never resume an interactive mode on startup
    overlay.move_mode_enabled = false;
}
