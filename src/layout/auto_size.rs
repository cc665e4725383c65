//! Content-driven overlay sizing
//!
//! Real text metrics need a renderer, so widths are estimated from a
//! per-character em table and a per-family correction for the timer digits.

use once_cell::sync::Lazy;
use regex::Regex;

use super::Size;
use crate::constants::layout::*;
use crate::constants::overlay::{
    MAX_FONT_SIZE, MAX_HEIGHT, MAX_WIDTH, MIN_FONT_SIZE, MIN_HEIGHT, MIN_WIDTH,
};
use crate::state::{DisplayMode, StateDocument, TimerMode};

/// Timer digit width relative to the `HH:MM:SS` baseline, first match wins
static FAMILY_MULTIPLIERS: Lazy<Vec<(Regex, f64)>> = Lazy::new(|| {
    [
        (r"(?i)montserrat", 4.35),
        (r"(?i)noto\s*sans\s*jp", 4.25),
        (r"(?i)roboto", 4.15),
        (r"(?i)inter", 4.15),
        (r"(?i)oswald", 4.10),
        (r"(?i)segoe\s*ui", 4.10),
    ]
    .into_iter()
    .filter_map(|(pattern, em)| Regex::new(pattern).ok().map(|re| (re, em / TIMER_EM_HMS)))
    .collect()
});

/// Everything the auto-size pass looks at
#[derive(Debug, Clone, Copy)]
pub struct AutoSizeInput<'a> {
    pub font_size_px: u32,
    pub cue_text: &'a str,
    pub font_family: &'a str,
    pub show_clock: bool,
    pub timer_mode: TimerMode,
    pub display_mode: DisplayMode,
}

impl<'a> AutoSizeInput<'a> {
    pub fn from_document(doc: &'a StateDocument) -> Self {
        Self {
            font_size_px: doc.overlay.font_size_px,
            cue_text: &doc.overlay.cue_text,
            font_family: &doc.overlay.font_family,
            show_clock: doc.overlay.show_clock,
            timer_mode: doc.timer.mode,
            display_mode: doc.timer.display_mode,
        }
    }
}

pub fn family_multiplier(font_family: &str) -> f64 {
    FAMILY_MULTIPLIERS
        .iter()
        .find(|(re, _)| re.is_match(font_family))
        .map(|(_, mul)| *mul)
        .unwrap_or(1.0)
}

/// Estimated width of `line` in em
pub fn estimate_em(line: &str) -> f64 {
    line.chars()
        .map(|ch| match ch {
            ' ' | '\t' => EM_WHITESPACE,
            c if c.is_ascii() => EM_ASCII,
            _ => EM_WIDE,
        })
        .sum()
}

/// Split on `\n` keeping a trailing empty line, dropping `\r` before it
fn cue_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line))
}

fn clamp_px(value: f64, min: u32, max: u32) -> u32 {
    (value.round().max(0.0) as u32).clamp(min, max)
}

/// Compute the overlay window size for the given content.
pub fn compute_auto_size(input: &AutoSizeInput) -> Size {
    let fs = f64::from(input.font_size_px.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE));
    let is_mss = input.timer_mode == TimerMode::Down && input.display_mode == DisplayMode::Mss;

    let timer_em = if is_mss { TIMER_EM_MSS } else { TIMER_EM_HMS };
    let timer_px = fs * timer_em * family_multiplier(input.font_family);

    let cue_size = (fs * CUE_SIZE_RATIO).floor().max(CUE_MIN_SIZE);
    let cue_line_height = cue_size * LINE_HEIGHT;

    // Wider cue lines wrap instead of growing past 1.5x the timer
    let base_width = timer_px + PAD_X;
    let max_width = base_width * MAX_WIDTH_FACTOR;

    let has_cue = !input.cue_text.is_empty();
    let longest_line_px = if has_cue {
        cue_lines(input.cue_text)
            .map(|line| estimate_em(line) * cue_size)
            .fold(0.0, f64::max)
    } else {
        0.0
    };

    let width = clamp_px(
        base_width.max(max_width.min(longest_line_px + PAD_X)),
        MIN_WIDTH,
        MAX_WIDTH,
    );

    let visual_lines: u32 = if has_cue {
        let inner_width = (f64::from(width) - PAD_X).max(1.0);
        cue_lines(input.cue_text)
            .map(|line| {
                let line_px = estimate_em(line) * cue_size;
                ((line_px / inner_width).ceil() as u32).max(1)
            })
            .sum()
    } else {
        0
    };

    let base_height = fs + GAP + cue_line_height * f64::from(visual_lines) + PAD_Y;

    let mut extra_height = 0.0;
    if input.show_clock {
        let clock_size = (fs * CLOCK_SIZE_RATIO).floor().max(CLOCK_MIN_SIZE);
        extra_height += (clock_size * LINE_HEIGHT + GAP).round();
    }
    if input.timer_mode == TimerMode::Down {
        extra_height += PROGRESS_BAR_HEIGHT + GAP;
    }

    let height = clamp_px(base_height + extra_height, MIN_HEIGHT, MAX_HEIGHT);

    Size { width, height }
}
