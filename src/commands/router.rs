//! Inbound command handling
//!
//! Every field is validated on its own: anything out of range is clamped,
//! anything uninterpretable is ignored and the previous value kept. A
//! command is never rejected as a whole.

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, info};

use super::payloads::*;
use crate::config::SizingPolicy;
use crate::constants::{overlay, timer};
use crate::controller::{Controller, Effects};
use crate::layout::{DragSurface, Size};
use crate::state::{DisplayMode, TimerMode};
use crate::store::migrate::normalize_font_family;
use crate::utils::{coerce_bool, coerce_int, normalize_hex_color};
use crate::utils::validation::{coerce_text, truncate_chars};

fn clamp_u32(value: &Value, min: u32, max: u32) -> Option<u32> {
    coerce_int(value, i64::from(min), i64::from(max)).map(|n| n as u32)
}

fn coerce_coord(value: &Value) -> Option<i32> {
    let limit = i64::from(overlay::COORD_LIMIT);
    coerce_int(value, -limit, limit).map(|n| n as i32)
}

fn coerce_f64(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Requested change to one nullable coordinate
enum CoordUpdate {
    Keep,
    Clear,
    Set(i32),
}

impl CoordUpdate {
    fn from_field(field: Option<&Value>) -> Self {
        match field {
            None => CoordUpdate::Keep,
            Some(Value::Null) => CoordUpdate::Clear,
            Some(Value::String(s)) if s.trim().is_empty() => CoordUpdate::Clear,
            Some(value) => coerce_coord(value).map_or(CoordUpdate::Keep, CoordUpdate::Set),
        }
    }

    fn apply(self, slot: &mut Option<i32>) {
        match self {
            CoordUpdate::Keep => {}
            CoordUpdate::Clear => *slot = None,
            CoordUpdate::Set(v) => *slot = Some(v),
        }
    }
}

impl Controller {
    /// Apply one command, then lay out, persist and broadcast as needed
    pub fn handle(&mut self, command: Command, now: DateTime<Utc>) {
        info!("Command: {}", command.name());
        let effects = match command {
            Command::ConfigureTimer(config) => self.configure_timer(config),
            Command::Control(request) => self.control(request, now),
            Command::UpdateOverlay(update) => self.update_overlay(update),
            Command::SetMoveMode(request) => self.set_move_mode(request),
            Command::SetCueText(request) => self.set_cue_text(request),
            Command::SetCueBlink(request) => self.set_cue_blink(request),
            Command::DragOverlay(request) => self.drag_overlay(request, now),
            Command::ReportOverlayPosition(report) => self.report_overlay_position(report, now),
        };
        self.finish(effects);
    }

    fn configure_timer(&mut self, config: TimerConfig) -> Effects {
        let config = config.resolve_legacy();
        let t = &mut self.doc.timer;

        if let Some(mode) = config.mode.as_ref().and_then(Value::as_str) {
            t.mode = if mode == "up" { TimerMode::Up } else { TimerMode::Down };
        }
        if let Some(display_mode) = config.display_mode.as_ref().and_then(Value::as_str) {
            t.display_mode = if display_mode == "mss" {
                DisplayMode::Mss
            } else {
                DisplayMode::Hms
            };
        }
        if let Some(start) = config
            .start_seconds
            .as_ref()
            .and_then(|v| clamp_u32(v, 0, timer::MAX_START_SECONDS))
        {
            t.start_seconds = start;
        }

        if let Some(enabled) = config.warn1_enabled.as_ref().and_then(coerce_bool) {
            t.warn1_enabled = enabled;
        }
        if let Some(enabled) = config.warn2_enabled.as_ref().and_then(coerce_bool) {
            t.warn2_enabled = enabled;
        }
        if let Some(minutes) = config
            .warn1_threshold_minutes
            .as_ref()
            .and_then(|v| clamp_u32(v, 0, timer::MAX_WARN_MINUTES))
        {
            t.warn1_threshold_minutes = minutes;
        }
        if let Some(minutes) = config
            .warn2_threshold_minutes
            .as_ref()
            .and_then(|v| clamp_u32(v, 0, timer::MAX_WARN_MINUTES))
        {
            t.warn2_threshold_minutes = minutes;
        }
        if let Some(color) = config.warn1_color.as_ref().and_then(Value::as_str).and_then(normalize_hex_color) {
            t.warn1_color = color;
        }
        if let Some(color) = config.warn2_color.as_ref().and_then(Value::as_str).and_then(normalize_hex_color) {
            t.warn2_color = color;
        }

        // Warnings only make sense when counting down
        if t.mode == TimerMode::Up {
            t.warn1_enabled = false;
            t.warn2_enabled = false;
        }
        if !t.running {
            t.rewind();
        }
        debug!(
            "Timer configured: mode={:?} display={:?} start={}s",
            t.mode, t.display_mode, t.start_seconds
        );

        Effects {
            tick: true,
            ..Effects::geometry()
        }
    }

    fn control(&mut self, request: ControlRequest, now: DateTime<Utc>) -> Effects {
        let Some(action) = request.action() else {
            debug!("Ignoring unknown control action {:?}", request.action);
            return Effects::none();
        };

        let t = &mut self.doc.timer;
        match action {
            ControlAction::Start => {
                t.start(now);
            }
            ControlAction::Pause => {
                t.pause();
            }
            ControlAction::Stop => t.stop(),
            ControlAction::Reset => t.reset(now, self.policies.reset),
        }
        info!("Timer {:?}: now {:?} at {}s", action, t.run_state(), t.elapsed_display);
        Effects::timer()
    }

    fn update_overlay(&mut self, update: OverlayUpdate) -> Effects {
        let update = update.resolve_legacy();
        if update.x.is_some() || update.y.is_some() {
            self.drag.cancel();
        }
        let o = &mut self.doc.overlay;
        let mut effects = Effects::geometry();

        if let Some(id) = update.display_id.as_ref().and_then(|v| coerce_int(v, 0, i64::MAX)) {
            o.target_display_id = Some(id as u64);
        }
        CoordUpdate::from_field(update.x.as_ref()).apply(&mut o.x);
        CoordUpdate::from_field(update.y.as_ref()).apply(&mut o.y);

        if let Some(family) = update.font_family.as_ref().and_then(coerce_text) {
            let family = normalize_font_family(family.trim());
            o.font_family = truncate_chars(&family, overlay::MAX_FONT_FAMILY_CHARS);
        }
        if let Some(size) = update
            .font_size_px
            .as_ref()
            .and_then(|v| clamp_u32(v, overlay::MIN_FONT_SIZE, overlay::MAX_FONT_SIZE))
        {
            o.font_size_px = size;
        }
        if let Some(color) = update.color.as_ref().and_then(Value::as_str).and_then(normalize_hex_color) {
            o.color_hex = color;
        }
        if let Some(show) = update.show_timer.as_ref().and_then(coerce_bool) {
            o.show_timer = show;
        }
        if let Some(show) = update.show_clock.as_ref().and_then(coerce_bool) {
            o.show_clock = show;
        }
        if let Some(text) = update.cue_text.as_ref().and_then(coerce_text) {
            if text != o.cue_text {
                o.cue_text = text;
                effects.cue = true;
            }
        }

        if self.policies.sizing == SizingPolicy::Manual {
            if let Some(w) = update
                .width
                .as_ref()
                .and_then(|v| clamp_u32(v, overlay::MIN_WIDTH, overlay::MAX_WIDTH))
            {
                o.width = w;
            }
            if let Some(h) = update
                .height
                .as_ref()
                .and_then(|v| clamp_u32(v, overlay::MIN_HEIGHT, overlay::MAX_HEIGHT))
            {
                o.height = h;
            }
        } else if update.width.is_some() || update.height.is_some() {
            debug!("Ignoring width/height: overlay size is derived");
        }

        effects
    }

    fn set_move_mode(&mut self, request: MoveModeRequest) -> Effects {
        match request.enabled.as_ref().and_then(coerce_bool) {
            Some(enabled) => {
                self.doc.overlay.move_mode_enabled = enabled;
                if !enabled && self.drag.has_pending() {
                    debug!("Dropping parked drag position");
                    self.drag.cancel();
                }
                info!("Move mode {}", if enabled { "on" } else { "off" });
                Effects::overlay()
            }
            None => Effects::none(),
        }
    }

    fn set_cue_text(&mut self, request: CueTextRequest) -> Effects {
        let text = request.text.as_ref().and_then(coerce_text).unwrap_or_default();
        debug!("Cue text set ({} chars)", text.chars().count());
        self.doc.overlay.cue_text = text;
        Effects {
            cue: true,
            ..Effects::geometry()
        }
    }

    fn set_cue_blink(&mut self, request: CueBlinkRequest) -> Effects {
        match request.enabled.as_ref().and_then(coerce_bool) {
            Some(enabled) => {
                self.doc.overlay.cue_blink_enabled = enabled;
                Effects::overlay()
            }
            None => Effects::none(),
        }
    }

    fn drag_overlay(&mut self, request: DragRequest, now: DateTime<Utc>) -> Effects {
        if !self.doc.overlay.move_mode_enabled {
            debug!("Ignoring drag outside move mode");
            return Effects::none();
        }
        let (Some(nx), Some(ny)) = (
            request.nx.as_ref().and_then(coerce_f64),
            request.ny.as_ref().and_then(coerce_f64),
        ) else {
            return Effects::none();
        };
        let Some(work_area) = self.target_work_area() else {
            return Effects::none();
        };

        let size = Size {
            width: self.doc.overlay.width,
            height: self.doc.overlay.height,
        };
        let position = DragSurface::new(work_area, size).to_screen(nx, ny);
        self.offer_position(position, now)
    }

    fn report_overlay_position(&mut self, report: PositionReport, now: DateTime<Utc>) -> Effects {
        if !self.doc.overlay.move_mode_enabled {
            debug!("Ignoring position report outside move mode");
            return Effects::none();
        }
        match (
            report.x.as_ref().and_then(coerce_coord),
            report.y.as_ref().and_then(coerce_coord),
        ) {
            (Some(x), Some(y)) => self.offer_position((x, y), now),
            _ => Effects::none(),
        }
    }

    /// Commit now, or park until the next frame
    fn offer_position(&mut self, position: (i32, i32), now: DateTime<Utc>) -> Effects {
        match self.drag.offer(now, position) {
            Some(position) => {
                self.doc.overlay.x = Some(position.0);
                self.doc.overlay.y = Some(position.1);
                Effects::geometry()
            }
            None => Effects::none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{OverrunPolicy, Policies, ResetPolicy};
    use crate::layout::Rect;
    use crate::services::{DisplayDescriptor, StaticDisplays};
    use crate::state::RunState;
    use crate::store::StateStore;
    use crate::sync::{MemoryChannel, OutboundEvent};
    use chrono::{Duration, TimeZone};
    use serde_json::json;
    use tempfile::TempDir;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 18, 30, 0).unwrap()
    }

    fn setup(policies: Policies) -> (TempDir, Controller, MemoryChannel) {
        let dir = TempDir::new().unwrap();
        let mut ctrl = Controller::new(
            StateStore::new(dir.path().join("state.json")),
            Box::new(StaticDisplays::single_primary()),
            policies,
        );
        let window = MemoryChannel::new();
        ctrl.register_channel(Box::new(window.clone()));
        window.drain();
        (dir, ctrl, window)
    }

    fn names(events: &[OutboundEvent]) -> Vec<&'static str> {
        events.iter().map(|e| e.event_name()).collect()
    }

    fn timer_cmd(v: Value) -> Command {
        Command::ConfigureTimer(serde_json::from_value(v).unwrap())
    }

    fn overlay_cmd(v: Value) -> Command {
        Command::UpdateOverlay(serde_json::from_value(v).unwrap())
    }

    fn control(action: ControlAction) -> Command {
        Command::Control(ControlRequest::new(action))
    }

    #[test]
    fn test_configure_timer_clamps_and_rewinds() {
        let (_dir, mut ctrl, window) = setup(Policies::default());
        ctrl.handle(
            timer_cmd(json!({
                "startSeconds": 999999,
                "warn1ThresholdMinutes": -4,
                "warn2ThresholdMinutes": "7",
                "warn1Color": " #00ff00 ",
                "warn2Color": "red",
            })),
            t0(),
        );

        let t = &ctrl.document().timer;
        assert_eq!(t.start_seconds, 86399);
        assert_eq!(t.elapsed_display, 86399);
        assert_eq!(t.warn1_threshold_minutes, 0);
        assert_eq!(t.warn2_threshold_minutes, 7);
        assert_eq!(t.warn1_color, "#00ff00");
        assert_eq!(t.warn2_color, "#F55700");
        assert_eq!(names(&window.drain()), vec!["state:sync", "timer:tick"]);
    }

    #[test]
    fn test_configure_timer_keeps_previous_on_garbage() {
        let (_dir, mut ctrl, _window) = setup(Policies::default());
        ctrl.handle(
            timer_cmd(json!({"startSeconds": "soon", "warn1Enabled": "yes", "mode": 5})),
            t0(),
        );

        let t = &ctrl.document().timer;
        assert_eq!(t.start_seconds, 300);
        assert!(t.warn1_enabled);
        assert_eq!(t.mode, TimerMode::Down);
    }

    #[test]
    fn test_up_mode_disables_warnings() {
        let (_dir, mut ctrl, _window) = setup(Policies::default());
        ctrl.handle(timer_cmd(json!({"mode": "up", "warn1Enabled": true})), t0());

        let t = &ctrl.document().timer;
        assert_eq!(t.mode, TimerMode::Up);
        assert!(!t.warn1_enabled && !t.warn2_enabled);
        assert_eq!(ctrl.document().overlay.height, 152);
    }

    #[test]
    fn test_configure_timer_while_running_keeps_elapsed() {
        let (_dir, mut ctrl, _window) = setup(Policies::default());
        ctrl.handle(control(ControlAction::Start), t0());
        ctrl.tick(t0() + Duration::seconds(10));
        ctrl.handle(timer_cmd(json!({"startSeconds": 60})), t0() + Duration::seconds(10));

        assert_eq!(ctrl.document().timer.start_seconds, 60);
        assert_eq!(ctrl.document().timer.elapsed_display, 290);
    }

    #[test]
    fn test_control_emits_tick_only() {
        let (_dir, mut ctrl, window) = setup(Policies::default());
        ctrl.handle(control(ControlAction::Start), t0());
        assert_eq!(ctrl.document().timer.run_state(), RunState::Running);
        assert_eq!(names(&window.drain()), vec!["timer:tick"]);

        ctrl.handle(control(ControlAction::Pause), t0());
        assert_eq!(ctrl.document().timer.run_state(), RunState::Paused);

        let unknown = Command::Control(serde_json::from_value(json!({"action": "rewind"})).unwrap());
        ctrl.handle(unknown, t0());
        assert_eq!(ctrl.document().timer.run_state(), RunState::Paused);
        assert_eq!(window.drain().len(), 1);
    }

    #[test]
    fn test_reset_follows_policy() {
        let (_dir, mut ctrl, _window) = setup(Policies::default());
        ctrl.handle(control(ControlAction::Start), t0());
        ctrl.tick(t0() + Duration::seconds(30));
        ctrl.handle(control(ControlAction::Reset), t0() + Duration::seconds(30));
        assert_eq!(ctrl.document().timer.elapsed_display, 300);
        assert_eq!(ctrl.document().timer.run_state(), RunState::Running);

        let policies = Policies {
            reset: ResetPolicy::ForceStop,
            ..Policies::default()
        };
        let (_dir, mut ctrl, _window) = setup(policies);
        ctrl.handle(control(ControlAction::Start), t0());
        ctrl.handle(control(ControlAction::Reset), t0());
        assert_eq!(ctrl.document().timer.run_state(), RunState::Stopped);
    }

    #[test]
    fn test_update_overlay_fields() {
        let (_dir, mut ctrl, window) = setup(Policies::default());
        ctrl.handle(
            overlay_cmd(json!({
                "fontSizePx": 1000,
                "color": "#123456",
                "showClock": true,
                "fontFamily": "Inter",
                "width": 3000,
            })),
            t0(),
        );

        let o = &ctrl.document().overlay;
        assert_eq!(o.font_size_px, 400);
        assert_eq!(o.color_hex, "#123456");
        assert!(o.show_clock);
        assert_eq!(o.font_family, "Inter, system-ui, -apple-system, sans-serif");
        assert_ne!(o.width, 3000);
        assert_eq!(names(&window.drain()), vec!["state:sync"]);
    }

    #[test]
    fn test_update_overlay_font_family_truncated() {
        let (_dir, mut ctrl, _window) = setup(Policies::default());
        let long = "x".repeat(300);
        ctrl.handle(overlay_cmd(json!({ "fontFamily": long })), t0());
        assert_eq!(ctrl.document().overlay.font_family.chars().count(), 128);
    }

    #[test]
    fn test_manual_sizing_accepts_width_height() {
        let policies = Policies {
            sizing: SizingPolicy::Manual,
            ..Policies::default()
        };
        let (_dir, mut ctrl, _window) = setup(policies);
        ctrl.handle(overlay_cmd(json!({"width": 50, "height": 900})), t0());

        let o = &ctrl.document().overlay;
        assert_eq!((o.width, o.height), (200, 900));
    }

    #[test]
    fn test_explicit_position_clamped_and_cleared() {
        let (_dir, mut ctrl, _window) = setup(Policies::default());
        ctrl.handle(overlay_cmd(json!({"x": 5000, "y": -30})), t0());
        let o = &ctrl.document().overlay;
        assert_eq!((o.x, o.y), (Some(1920 - 540), Some(0)));

        ctrl.handle(overlay_cmd(json!({"x": null, "y": ""})), t0());
        assert!(ctrl.document().overlay.is_auto_placed());
        assert_eq!(ctrl.bounds().map(|b| (b.x, b.y)), Some((1356, 24)));
    }

    #[test]
    fn test_single_explicit_coordinate_is_clamped() {
        let (dir, mut ctrl, _window) = setup(Policies::default());
        ctrl.handle(overlay_cmd(json!({"x": 99999})), t0());

        let o = &ctrl.document().overlay;
        assert_eq!((o.x, o.y), (Some(1920 - 540), None));
        assert_eq!(ctrl.bounds().map(|b| (b.x, b.y)), Some((1356, 24)));

        let reloaded = StateStore::new(dir.path().join("state.json")).load();
        assert_eq!((reloaded.overlay.x, reloaded.overlay.y), (Some(1380), None));
    }

    #[test]
    fn test_current_color_key_beats_legacy() {
        let (_dir, mut ctrl, _window) = setup(Policies::default());
        ctrl.handle(overlay_cmd(json!({"color": "#ABCDEF", "colorHex": "#000000"})), t0());
        assert_eq!(ctrl.document().overlay.color_hex, "#ABCDEF");

        ctrl.handle(overlay_cmd(json!({"colorHex": "#00ff00"})), t0());
        assert_eq!(ctrl.document().overlay.color_hex, "#00ff00");
    }

    #[test]
    fn test_cue_text_through_update_overlay() {
        let (_dir, mut ctrl, window) = setup(Policies::default());
        ctrl.handle(overlay_cmd(json!({"kanpeText": "Q&A next"})), t0());
        assert_eq!(ctrl.document().overlay.cue_text, "Q&A next");
        assert_eq!(names(&window.drain()), vec!["state:sync", "cue:update"]);

        ctrl.handle(overlay_cmd(json!({"cueText": "Q&A next"})), t0());
        assert_eq!(names(&window.drain()), vec!["state:sync"]);
    }

    #[test]
    fn test_set_cue_text_grows_overlay() {
        let (_dir, mut ctrl, window) = setup(Policies::default());
        let before = ctrl.document().overlay.height;
        ctrl.handle(
            Command::SetCueText(serde_json::from_value(json!({"text": "one\ntwo\nthree"})).unwrap()),
            t0(),
        );
        assert!(ctrl.document().overlay.height > before);
        assert_eq!(names(&window.drain()), vec!["state:sync", "cue:update"]);

        ctrl.handle(Command::SetCueText(CueTextRequest::default()), t0());
        assert_eq!(ctrl.document().overlay.cue_text, "");
        assert_eq!(ctrl.document().overlay.height, before);
    }

    #[test]
    fn test_move_mode_and_blink() {
        let (_dir, mut ctrl, window) = setup(Policies::default());
        ctrl.handle(
            Command::SetMoveMode(serde_json::from_value(json!({"enabled": true})).unwrap()),
            t0(),
        );
        ctrl.handle(
            Command::SetCueBlink(serde_json::from_value(json!({"enabled": true})).unwrap()),
            t0(),
        );
        ctrl.handle(
            Command::SetCueBlink(serde_json::from_value(json!({"enabled": "no"})).unwrap()),
            t0(),
        );

        assert!(ctrl.document().overlay.move_mode_enabled);
        assert!(ctrl.document().overlay.cue_blink_enabled);
        assert_eq!(names(&window.drain()), vec!["state:sync", "state:sync"]);
    }

    fn drag(nx: f64, ny: f64) -> Command {
        Command::DragOverlay(serde_json::from_value(json!({"nx": nx, "ny": ny})).unwrap())
    }

    #[test]
    fn test_drag_requires_move_mode() {
        let (_dir, mut ctrl, window) = setup(Policies::default());
        ctrl.handle(drag(0.0, 0.0), t0());
        assert!(ctrl.document().overlay.is_auto_placed());
        assert!(window.drain().is_empty());
    }

    #[test]
    fn test_drag_is_throttled_per_frame() {
        let (_dir, mut ctrl, window) = setup(Policies::default());
        ctrl.doc.overlay.move_mode_enabled = true;

        ctrl.handle(drag(0.0, 0.0), t0());
        assert_eq!((ctrl.document().overlay.x, ctrl.document().overlay.y), (Some(0), Some(0)));

        ctrl.handle(drag(1.0, 1.0), t0() + Duration::milliseconds(5));
        assert_eq!(ctrl.document().overlay.x, Some(0));
        assert!(ctrl.drag.has_pending());

        ctrl.tick(t0() + Duration::milliseconds(20));
        let o = &ctrl.document().overlay;
        assert_eq!((o.x, o.y), (Some(1920 - 540), Some(1080 - 166)));
        assert_eq!(names(&window.drain()), vec!["state:sync", "state:sync"]);
    }

    #[test]
    fn test_parked_drag_dropped_when_move_mode_ends() {
        let (_dir, mut ctrl, _window) = setup(Policies::default());
        let move_mode = |enabled: bool| {
            Command::SetMoveMode(serde_json::from_value(json!({"enabled": enabled})).unwrap())
        };
        ctrl.handle(move_mode(true), t0());
        ctrl.handle(drag(0.0, 0.0), t0());
        ctrl.handle(drag(1.0, 1.0), t0() + Duration::milliseconds(5));
        assert!(ctrl.drag.has_pending());

        ctrl.handle(move_mode(false), t0() + Duration::milliseconds(6));
        ctrl.handle(overlay_cmd(json!({"x": null, "y": null})), t0() + Duration::milliseconds(7));
        ctrl.tick(t0() + Duration::milliseconds(200));

        assert!(!ctrl.drag.has_pending());
        assert!(ctrl.document().overlay.is_auto_placed());
        assert_eq!(ctrl.bounds().map(|b| (b.x, b.y)), Some((1356, 24)));
    }

    #[test]
    fn test_explicit_position_supersedes_parked_drag() {
        let (_dir, mut ctrl, _window) = setup(Policies::default());
        ctrl.doc.overlay.move_mode_enabled = true;
        ctrl.handle(drag(0.0, 0.0), t0());
        ctrl.handle(drag(1.0, 1.0), t0() + Duration::milliseconds(5));

        ctrl.handle(overlay_cmd(json!({"x": 200, "y": 300})), t0() + Duration::milliseconds(6));
        ctrl.tick(t0() + Duration::milliseconds(200));

        let o = &ctrl.document().overlay;
        assert_eq!((o.x, o.y), (Some(200), Some(300)));
    }

    #[test]
    fn test_position_report_clamped_into_work_area() {
        let (_dir, mut ctrl, _window) = setup(Policies::default());
        ctrl.doc.overlay.move_mode_enabled = true;
        ctrl.handle(
            Command::ReportOverlayPosition(
                serde_json::from_value(json!({"x": -500, "y": 100})).unwrap(),
            ),
            t0(),
        );
        let o = &ctrl.document().overlay;
        assert_eq!((o.x, o.y), (Some(0), Some(100)));
    }

    #[test]
    fn test_display_change_reruns_auto_placement() {
        let dir = TempDir::new().unwrap();
        let area = |x| Rect::new(x, 0, 1920, 1080);
        let displays = StaticDisplays::new(vec![
            DisplayDescriptor {
                id: 1,
                label: "Built-in".to_string(),
                bounds: area(0),
                work_area: area(0),
                is_primary: true,
            },
            DisplayDescriptor {
                id: 2,
                label: "Projector".to_string(),
                bounds: area(1920),
                work_area: area(1920),
                is_primary: false,
            },
        ]);
        let mut ctrl = Controller::new(
            StateStore::new(dir.path().join("state.json")),
            Box::new(displays),
            Policies {
                overrun: OverrunPolicy::AllowNegative,
                ..Policies::default()
            },
        );
        assert_eq!(ctrl.document().overlay.target_display_id, Some(2));

        ctrl.handle(overlay_cmd(json!({"x": 100, "y": 100})), t0());
        ctrl.handle(overlay_cmd(json!({"x": null, "y": null})), t0());
        ctrl.handle(overlay_cmd(json!({"displayId": 1})), t0());

        assert!(ctrl.document().overlay.is_auto_placed());
        assert_eq!(ctrl.document().overlay.target_display_id, Some(1));
        assert_eq!(ctrl.bounds(), Some(Rect::new(1920 - 540 - 24, 24, 540, 166)));
    }
}
