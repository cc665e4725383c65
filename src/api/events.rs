//! Server-sent event stream: one output channel per connected window

use std::{convert::Infallible, sync::Arc};
use axum::{
    extract::State,
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::{self, Stream};
use tokio::sync::mpsc;
use tracing::{debug, error};

use crate::{
    state::AppState,
    sync::{ChannelId, MpscChannel, OutboundEvent},
};

/// Events a slow reader may fall behind by before sends are skipped
const EVENT_QUEUE_DEPTH: usize = 256;

/// Deregisters the channel when the response stream is dropped
struct ChannelGuard {
    state: Arc<AppState>,
    id: ChannelId,
}

impl Drop for ChannelGuard {
    fn drop(&mut self) {
        debug!("Event stream {} closed", self.id);
        if let Err(e) = self.state.deregister_channel(self.id) {
            error!("Failed to deregister channel {}: {}", self.id, e);
        }
    }
}

fn to_sse(event: &OutboundEvent) -> Event {
    Event::default()
        .event(event.event_name())
        .data(event.payload().to_string())
}

/// Handle GET /events - register a window and stream its events
pub async fn events_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, StatusCode> {
    let (tx, rx) = mpsc::channel(EVENT_QUEUE_DEPTH);
    let id = state
        .register_channel(Box::new(MpscChannel::new(tx)))
        .map_err(|e| {
            error!("Failed to register event stream: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
    let guard = ChannelGuard { state, id };

    let events = stream::unfold((rx, guard), |(mut rx, guard)| async move {
        let event = rx.recv().await?;
        Some((Ok(to_sse(&event)), (rx, guard)))
    });
    Ok(Sse::new(events).keep_alive(KeepAlive::default()))
}
