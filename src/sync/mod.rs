//! State broadcast to every open window
//!
//! Windows register an [`OutputChannel`] for their lifetime; the
//! [`SyncBroadcaster`] composes payloads and fans them out.

pub mod broadcaster;
pub mod channels;
pub mod events;

pub use broadcaster::SyncBroadcaster;
pub use channels::{ChannelId, ChannelRegistry, MemoryChannel, MpscChannel, OutputChannel};
pub use events::{
    CuePayload, DisplayInfo, FullSyncPayload, OutboundEvent, StateSnapshot, TimerPayload,
};
