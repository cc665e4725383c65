//! Composes outbound payloads and fans them out to registered channels

use tracing::debug;

use super::{
    ChannelId, ChannelRegistry, CuePayload, DisplayInfo, FullSyncPayload, OutboundEvent,
    OutputChannel, TimerPayload,
};
use crate::layout::Rect;
use crate::services::DisplayDescriptor;
use crate::state::StateDocument;

#[derive(Default)]
pub struct SyncBroadcaster {
    registry: ChannelRegistry,
}

impl SyncBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, channel: Box<dyn OutputChannel>) -> ChannelId {
        self.registry.register(channel)
    }

    pub fn deregister(&mut self, id: ChannelId) -> bool {
        self.registry.deregister(id)
    }

    pub fn channel_count(&self) -> usize {
        self.registry.len()
    }

    /// Overlay snapshot, derived timer payload and the display list
    pub fn broadcast_full_sync(
        &mut self,
        doc: &StateDocument,
        displays: &[DisplayDescriptor],
        bounds: Option<Rect>,
    ) {
        let payload = FullSyncPayload {
            overlay: doc.overlay.clone(),
            timer: TimerPayload::from_document(doc),
            displays: displays.iter().map(DisplayInfo::from).collect(),
            bounds,
        };
        self.emit(OutboundEvent::StateSync(payload));
    }

    /// Timer-only update
    pub fn broadcast_tick(&mut self, doc: &StateDocument) {
        self.emit(OutboundEvent::TimerTick(TimerPayload::from_document(doc)));
    }

    /// Cue text for listeners that only care about cue content
    pub fn broadcast_cue(&mut self, text: &str) {
        self.emit(OutboundEvent::CueUpdate(CuePayload {
            text: text.to_string(),
        }));
    }

    fn emit(&mut self, event: OutboundEvent) {
        if self.registry.is_empty() {
            return;
        }
        debug!("Broadcasting {} to {} channel(s)", event.event_name(), self.registry.len());
        self.registry.send_all(&event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::MemoryChannel;

    #[test]
    fn test_full_sync_carries_displays_and_bounds() {
        let mut broadcaster = SyncBroadcaster::new();
        let window = MemoryChannel::new();
        broadcaster.register(Box::new(window.clone()));

        let area = Rect::new(0, 0, 1280, 720);
        let displays = vec![DisplayDescriptor {
            id: 4,
            label: String::new(),
            bounds: area,
            work_area: area,
            is_primary: true,
        }];
        let bounds = Some(Rect::new(10, 20, 300, 100));
        broadcaster.broadcast_full_sync(&StateDocument::default(), &displays, bounds);

        match window.drain().as_slice() {
            [OutboundEvent::StateSync(payload)] => {
                assert_eq!(payload.displays[0].name, "4");
                assert_eq!(payload.bounds, bounds);
                assert_eq!(payload.timer.formatted_text, "00:05:00");
            }
            other => panic!("unexpected events: {other:?}"),
        }
    }

    #[test]
    fn test_tick_and_cue() {
        let mut broadcaster = SyncBroadcaster::new();
        let window = MemoryChannel::new();
        let id = broadcaster.register(Box::new(window.clone()));

        broadcaster.broadcast_tick(&StateDocument::default());
        broadcaster.broadcast_cue("slide 3");
        let events = window.drain();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].event_name(), "timer:tick");
        assert_eq!(
            events[1],
            OutboundEvent::CueUpdate(CuePayload { text: "slide 3".to_string() })
        );

        broadcaster.deregister(id);
        broadcaster.broadcast_cue("gone");
        assert!(window.drain().is_empty());
        assert_eq!(broadcaster.channel_count(), 0);
    }
}
