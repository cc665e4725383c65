//! Lenient field coercion for inbound payloads and persisted documents
//!
//! Every helper returns `None` for values it cannot interpret so callers can
//! keep the previous value instead of rejecting the whole payload.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9a-fA-F]{6}$").expect("valid hex color pattern"));

/// Trimmed `#RRGGBB` string, or `None` if it does not match
pub fn normalize_hex_color(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    HEX_COLOR.is_match(trimmed).then(|| trimmed.to_string())
}

/// Integer from a JSON number or numeric string, floored and clamped
pub fn coerce_int(value: &Value, min: i64, max: i64) -> Option<i64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !n.is_finite() {
        return None;
    }
    Some((n.floor() as i64).clamp(min, max))
}

pub fn coerce_bool(value: &Value) -> Option<bool> {
    value.as_bool()
}

/// Text content from strings, numbers or booleans; `None` for null and containers
pub fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Keep at most `max_chars` characters
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}
