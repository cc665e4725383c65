//! Top-level owner of the authoritative state
//!
//! The [`Controller`] is the single mutator: commands (see
//! [`crate::commands::router`]) and ticks both go through it, and every
//! mutation ends with layout (when geometry changed), persistence and
//! broadcast. It is synchronous; the async shell serializes access to it.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::config::{Policies, SizingPolicy};
use crate::layout::bounds::clamp_axis;
use crate::layout::{
    compute_auto_size, compute_bounds, resolve_target_display, AutoSizeInput, CommitThrottle, Rect,
};
use crate::services::{DisplayDescriptor, DisplayProvider};
use crate::state::StateDocument;
use crate::store::StateStore;
use crate::sync::{
    ChannelId, CuePayload, DisplayInfo, FullSyncPayload, OutboundEvent, OutputChannel,
    StateSnapshot, SyncBroadcaster, TimerPayload,
};

/// Follow-up work after a mutation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Effects {
    pub layout: bool,
    pub persist: bool,
    pub full_sync: bool,
    pub tick: bool,
    pub cue: bool,
}

impl Effects {
    pub(crate) fn none() -> Self {
        Self::default()
    }

    /// Geometry-relevant change: layout, persist, full-sync
    pub(crate) fn geometry() -> Self {
        Self {
            layout: true,
            persist: true,
            full_sync: true,
            ..Self::default()
        }
    }

    /// Non-geometry overlay change: persist, full-sync
    pub(crate) fn overlay() -> Self {
        Self {
            persist: true,
            full_sync: true,
            ..Self::default()
        }
    }

    /// Timer-only change: persist, tick
    pub(crate) fn timer() -> Self {
        Self {
            persist: true,
            tick: true,
            ..Self::default()
        }
    }
}

pub struct Controller {
    pub(crate) doc: StateDocument,
    pub(crate) policies: Policies,
    pub(crate) drag: CommitThrottle,
    store: StateStore,
    broadcaster: SyncBroadcaster,
    displays: Box<dyn DisplayProvider>,
    bounds: Option<Rect>,
}

impl Controller {
    /// Load persisted state and resolve the initial layout
    pub fn new(store: StateStore, displays: Box<dyn DisplayProvider>, policies: Policies) -> Self {
        let doc = store.load();
        info!(
            "Loaded state: mode={:?}, start={}s, running={}",
            doc.timer.mode, doc.timer.start_seconds, doc.timer.running
        );
        let mut controller = Self {
            doc,
            policies,
            drag: CommitThrottle::new(),
            store,
            broadcaster: SyncBroadcaster::new(),
            displays,
            bounds: None,
        };
        controller.finish(Effects::geometry());
        controller
    }

    pub fn document(&self) -> &StateDocument {
        &self.doc
    }

    pub fn policies(&self) -> Policies {
        self.policies
    }

    /// Overlay rectangle from the last layout pass
    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    pub fn displays(&self) -> Vec<DisplayDescriptor> {
        self.displays.displays()
    }

    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            overlay: self.doc.overlay.clone(),
            timer: TimerPayload::from_document(&self.doc),
        }
    }

    /// Register a window's channel and bring it up to date immediately
    pub fn register_channel(&mut self, channel: Box<dyn OutputChannel>) -> ChannelId {
        let displays = self.displays();
        channel.send(&OutboundEvent::StateSync(FullSyncPayload {
            overlay: self.doc.overlay.clone(),
            timer: TimerPayload::from_document(&self.doc),
            displays: displays.iter().map(DisplayInfo::from).collect(),
            bounds: self.bounds,
        }));
        channel.send(&OutboundEvent::TimerTick(TimerPayload::from_document(&self.doc)));
        channel.send(&OutboundEvent::CueUpdate(CuePayload {
            text: self.doc.overlay.cue_text.clone(),
        }));
        self.broadcaster.register(channel)
    }

    pub fn deregister_channel(&mut self, id: ChannelId) -> bool {
        self.broadcaster.deregister(id)
    }

    pub fn channel_count(&self) -> usize {
        self.broadcaster.channel_count()
    }

    /// Advance the timer to `now`; also releases a throttled drag commit.
    pub fn tick(&mut self, now: DateTime<Utc>) {
        if self.doc.overlay.move_mode_enabled {
            if let Some(position) = self.drag.flush(now) {
                self.commit_position(position);
            }
        }

        let before = (self.doc.timer.elapsed_display, self.doc.timer.running);
        if !self.doc.timer.tick(now, self.policies.overrun) {
            return;
        }
        let after = (self.doc.timer.elapsed_display, self.doc.timer.running);

        // Only persist when something visible changed, not on every sub-second tick
        let persist = before != after;
        if persist {
            debug!("Tick: display={} running={}", after.0, after.1);
        }
        self.finish(Effects {
            persist,
            tick: true,
            ..Effects::none()
        });
    }

    /// Write an explicit overlay position and push it out
    pub(crate) fn commit_position(&mut self, (x, y): (i32, i32)) {
        debug!("Committing overlay position ({}, {})", x, y);
        self.doc.overlay.x = Some(x);
        self.doc.overlay.y = Some(y);
        self.finish(Effects::geometry());
    }

    /// Work area of the display the overlay resolves to
    pub(crate) fn target_work_area(&self) -> Option<Rect> {
        let displays = self.displays();
        resolve_target_display(&displays, self.doc.overlay.target_display_id).map(|d| d.work_area)
    }

    /// Recompute overlay size (when derived), resolve the target display and
    /// clamp the position into its work area.
    fn apply_layout(&mut self) {
        if self.policies.sizing == SizingPolicy::Derived {
            let size = compute_auto_size(&AutoSizeInput::from_document(&self.doc));
            self.doc.overlay.width = size.width;
            self.doc.overlay.height = size.height;
        }

        let displays = self.displays();
        let overlay = &mut self.doc.overlay;
        self.bounds = match resolve_target_display(&displays, overlay.target_display_id) {
            Some(display) => {
                overlay.target_display_id = Some(display.id);
                let wa = display.work_area;
                let bounds = compute_bounds(overlay, &wa);
                // Each explicit coordinate stays on-screen even while the other is unset
                overlay.x = overlay.x.map(|x| clamp_axis(x, wa.x, wa.width, bounds.width));
                overlay.y = overlay.y.map(|y| clamp_axis(y, wa.y, wa.height, bounds.height));
                Some(bounds)
            }
            None => None,
        };
        debug!(
            "Layout: {}x{} at {:?} on display {:?}",
            overlay.width, overlay.height, self.bounds, overlay.target_display_id
        );
    }

    /// mutate → layout → persist → broadcast
    pub(crate) fn finish(&mut self, effects: Effects) {
        if effects.layout {
            self.apply_layout();
        }
        if effects.persist {
            self.store.save(&self.doc);
        }
        if effects.full_sync {
            let displays = self.displays();
            self.broadcaster.broadcast_full_sync(&self.doc, &displays, self.bounds);
        }
        if effects.tick {
            self.broadcaster.broadcast_tick(&self.doc);
        }
        if effects.cue {
            self.broadcaster.broadcast_cue(&self.doc.overlay.cue_text);
        }
    }
}
