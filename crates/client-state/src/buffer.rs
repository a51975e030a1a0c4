use crate::{config::DEFAULT_EVENTS_CAPACITY, records::ChatMessage};

use std::{
	collections::VecDeque,
	fmt,
	sync::{Mutex, MutexGuard, PoisonError},
};

use tokio::sync::broadcast;
use tracing::trace;

pub const DEFAULT_CHAT_CAPACITY: usize = 100;

#[derive(Debug, Clone)]
pub enum BufferEvent<T> {
	Appended(T),
	Cleared,
}

/// Insertion ordered buffer that keeps only the newest `capacity` entries.
///
/// Entries are kept in arrival order, never re-sorted by their own timestamps.
pub struct BoundedBuffer<T> {
	capacity: usize,
	entries: Mutex<VecDeque<T>>,
	events: broadcast::Sender<BufferEvent<T>>,
}

pub type ChatFeed = BoundedBuffer<ChatMessage>;

impl<T: Clone> BoundedBuffer<T> {
	/// A capacity of zero is treated as one.
	#[must_use]
	pub fn new(capacity: usize, events_capacity: usize) -> Self {
		let capacity = capacity.max(1);

		Self {
			capacity,
			entries: Mutex::new(VecDeque::with_capacity(capacity)),
			events: broadcast::channel(events_capacity.max(1)).0,
		}
	}

	pub fn append(&self, entry: T) {
		let evicted = {
			let mut entries = self.lock();
			entries.push_back(entry.clone());
			let overflow = entries.len().saturating_sub(self.capacity);
			entries.drain(..overflow).count()
		};

		if evicted > 0 {
			trace!(evicted, capacity = self.capacity, "dropped oldest entries");
		}

		self.emit(BufferEvent::Appended(entry));
	}

	#[must_use]
	pub fn snapshot(&self) -> Vec<T> {
		self.lock().iter().cloned().collect()
	}

	pub fn clear(&self) {
		self.lock().clear();
		self.emit(BufferEvent::Cleared);
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.lock().len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.lock().is_empty()
	}

	#[must_use]
	pub const fn capacity(&self) -> usize {
		self.capacity
	}

	#[must_use]
	pub fn subscribe(&self) -> broadcast::Receiver<BufferEvent<T>> {
		self.events.subscribe()
	}

	fn lock(&self) -> MutexGuard<'_, VecDeque<T>> {
		self.entries.lock().unwrap_or_else(PoisonError::into_inner)
	}

	fn emit(&self, event: BufferEvent<T>) {
		if self.events.receiver_count() > 0 {
			self.events.send(event).ok();
		}
	}
}

impl<T: Clone> Default for BoundedBuffer<T> {
	fn default() -> Self {
		Self::new(DEFAULT_CHAT_CAPACITY, DEFAULT_EVENTS_CAPACITY)
	}
}

impl<T> fmt::Debug for BoundedBuffer<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("BoundedBuffer")
			.field("capacity", &self.capacity)
			.field(
				"len",
				&self
					.entries
					.lock()
					.unwrap_or_else(PoisonError::into_inner)
					.len(),
			)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn keeps_the_last_entries_in_arrival_order() {
		let buffer = BoundedBuffer::new(100, 8);

		for extra in [0, 1, 37, 250] {
			buffer.clear();
			for i in 0..100 + extra {
				buffer.append(i);
			}

			let snapshot = buffer.snapshot();
			assert_eq!(snapshot.len(), 100);
			assert_eq!(snapshot, (extra..100 + extra).collect::<Vec<_>>());
		}
	}

	#[test]
	fn under_capacity_keeps_everything() {
		let buffer = BoundedBuffer::new(5, 8);
		buffer.append("b");
		buffer.append("a");

		assert_eq!(buffer.snapshot(), vec!["b", "a"]);
		assert_eq!(buffer.len(), 2);
	}

	#[test]
	fn zero_capacity_holds_one() {
		let buffer = BoundedBuffer::new(0, 8);
		buffer.append(1);
		buffer.append(2);

		assert_eq!(buffer.capacity(), 1);
		assert_eq!(buffer.snapshot(), vec![2]);
	}

	#[test]
	fn default_capacity() {
		assert_eq!(ChatFeed::default().capacity(), DEFAULT_CHAT_CAPACITY);
	}

	#[tokio::test]
	async fn publishes_appends_and_clears() {
		let buffer = BoundedBuffer::new(2, 8);
		let mut events = buffer.subscribe();

		buffer.append(10);
		buffer.clear();

		assert!(matches!(events.recv().await, Ok(BufferEvent::Appended(10))));
		assert!(matches!(events.recv().await, Ok(BufferEvent::Cleared)));
		assert!(buffer.is_empty());
	}
}
