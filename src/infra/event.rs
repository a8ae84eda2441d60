//! Core event bus
//!
//! Volume lifecycle changes are broadcast so transports and background
//! listeners can react without the manager knowing about them.

use crate::volume::VolumeId;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Events emitted when volume state changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
	/// A volume was created or updated
	VolumeSaved { id: VolumeId },
	/// A volume was deleted
	VolumeDeleted { id: VolumeId },
	/// The presentation order of volumes changed
	VolumesReordered { ids: Vec<VolumeId> },
}

/// Broadcast bus for core events.
pub struct EventBus {
	tx: broadcast::Sender<Event>,
}

impl Default for EventBus {
	fn default() -> Self {
		let (tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
		Self { tx }
	}
}

impl EventBus {
	/// Subscribe to all future events.
	pub fn subscribe(&self) -> broadcast::Receiver<Event> {
		self.tx.subscribe()
	}

	/// Emit an event to all subscribers.
	pub fn emit(&self, event: Event) {
		if let Err(e) = self.tx.send(event) {
			// Send only fails when nobody is subscribed
			debug!(?e, "Dropped event without subscribers");
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use uuid::Uuid;

	#[tokio::test]
	async fn test_subscribers_receive_events() {
		let bus = EventBus::default();
		let mut rx = bus.subscribe();

		let id = Uuid::now_v7();
		bus.emit(Event::VolumeSaved { id });

		match rx.recv().await.unwrap() {
			Event::VolumeSaved { id: received } => assert_eq!(received, id),
			other => panic!("Unexpected event: {:?}", other),
		}
	}

	#[test]
	fn test_emit_without_subscribers_does_not_panic() {
		let bus = EventBus::default();
		bus.emit(Event::VolumesReordered { ids: vec![] });
	}
}
