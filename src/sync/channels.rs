//! Output channel registry
//!
//! A channel lives as long as the window behind it. Sends are
//! fire-and-forget: no acknowledgment, no backpressure, and a channel that
//! reports itself dead is skipped and dropped from the registry.

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tracing::{debug, info};

use super::OutboundEvent;

pub type ChannelId = u64;

/// Something that can receive outbound events
pub trait OutputChannel: Send {
    /// False once the window behind the channel has gone away
    fn is_alive(&self) -> bool;

    fn send(&self, event: &OutboundEvent);
}

#[derive(Default)]
pub struct ChannelRegistry {
    next_id: ChannelId,
    channels: Vec<(ChannelId, Box<dyn OutputChannel>)>,
}

impl ChannelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, channel: Box<dyn OutputChannel>) -> ChannelId {
        self.next_id += 1;
        let id = self.next_id;
        self.channels.push((id, channel));
        info!("Output channel {} registered ({} open)", id, self.channels.len());
        id
    }

    /// Remove a channel; returns false if it was already gone
    pub fn deregister(&mut self, id: ChannelId) -> bool {
        let before = self.channels.len();
        self.channels.retain(|(channel_id, _)| *channel_id != id);
        let removed = self.channels.len() != before;
        if removed {
            info!("Output channel {} deregistered ({} open)", id, self.channels.len());
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Deliver `event` to every live channel, dropping dead ones
    pub fn send_all(&mut self, event: &OutboundEvent) {
        self.channels.retain(|(id, channel)| {
            let alive = channel.is_alive();
            if !alive {
                debug!("Dropping closed output channel {}", id);
            }
            alive
        });
        for (_, channel) in &self.channels {
            channel.send(event);
        }
    }
}

/// Channel feeding a tokio mpsc queue (one per connected event stream)
pub struct MpscChannel {
    tx: mpsc::Sender<OutboundEvent>,
}

impl MpscChannel {
    pub fn new(tx: mpsc::Sender<OutboundEvent>) -> Self {
        Self { tx }
    }
}

impl OutputChannel for MpscChannel {
    fn is_alive(&self) -> bool {
        !self.tx.is_closed()
    }

    fn send(&self, event: &OutboundEvent) {
        // A full queue means a slow reader; it will catch up on the next full-sync
        if let Err(e) = self.tx.try_send(event.clone()) {
            debug!("Skipped {} for a busy channel: {}", event.event_name(), e);
        }
    }
}

/// In-process channel that records events; also handy for embedding
#[derive(Clone, Default)]
pub struct MemoryChannel {
    events: Arc<Mutex<Vec<OutboundEvent>>>,
    closed: Arc<Mutex<bool>>,
}

impl MemoryChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take everything received so far
    pub fn drain(&self) -> Vec<OutboundEvent> {
        self.events
            .lock()
            .map(|mut events| std::mem::take(&mut *events))
            .unwrap_or_default()
    }

    pub fn close(&self) {
        if let Ok(mut closed) = self.closed.lock() {
            *closed = true;
        }
    }
}

impl OutputChannel for MemoryChannel {
    fn is_alive(&self) -> bool {
        self.closed.lock().map(|closed| !*closed).unwrap_or(false)
    }

    fn send(&self, event: &OutboundEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}
