//! Display strings for the timer value

use crate::state::TimerState;

/// Render the displayed value: `残りM分SS秒` for countdowns in the long form,
/// zero-padded `HH:MM:SS` otherwise. Negative values keep their sign.
pub fn format_elapsed(state: &TimerState) -> String {
    if state.uses_mss() {
        seconds_to_mss(state.elapsed_display)
    } else {
        seconds_to_hms(state.elapsed_display)
    }
}

/// Markup variant of the long form with the numbers and labels in separate
/// spans. `None` outside the long form; callers fall back to the plain text.
pub fn format_elapsed_markup(state: &TimerState) -> Option<String> {
    state
        .uses_mss()
        .then(|| seconds_to_mss_markup(state.elapsed_display))
}

fn split_sign(seconds: i64) -> (&'static str, u64) {
    let sign = if seconds < 0 { "-" } else { "" };
    (sign, seconds.unsigned_abs())
}

pub fn seconds_to_hms(seconds: i64) -> String {
    let (sign, s) = split_sign(seconds);
    let hh = s / 3600;
    let mm = (s % 3600) / 60;
    let ss = s % 60;
    format!("{sign}{hh:02}:{mm:02}:{ss:02}")
}

pub fn seconds_to_mss(seconds: i64) -> String {
    let (sign, s) = split_sign(seconds);
    format!("残り{sign}{}分{:02}秒", s / 60, s % 60)
}

pub fn seconds_to_mss_markup(seconds: i64) -> String {
    let (sign, s) = split_sign(seconds);
    format!(
        "<span class=\"t-label\">残り</span>\
         <span class=\"t-num\">{sign}{}</span>\
         <span class=\"t-label\">分</span>\
         <span class=\"t-num\">{:02}</span>\
         <span class=\"t-label\">秒</span>",
        s / 60,
        s % 60
    )
}
