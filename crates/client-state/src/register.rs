use crate::records::PlayerProfile;

use p2pong_identity::CanonicalKey;

use std::fmt;

use tokio::sync::watch;

/// Single slot holder, overwritten on every `set`.
pub struct Register<T> {
	slot: watch::Sender<Option<T>>,
}

/// The game currently in focus.
pub type ActiveGame = Register<CanonicalKey>;

/// The player running this client.
pub type LocalPlayer = Register<PlayerProfile>;

impl<T: Clone> Register<T> {
	#[must_use]
	pub fn new() -> Self {
		Self {
			slot: watch::channel(None).0,
		}
	}

	pub fn set(&self, maybe_value: Option<T>) {
		self.slot.send_replace(maybe_value);
	}

	#[must_use]
	pub fn get(&self) -> Option<T> {
		self.slot.borrow().clone()
	}

	/// Clears the slot, returning what it held.
	pub fn take(&self) -> Option<T> {
		self.slot.send_replace(None)
	}

	#[must_use]
	pub fn subscribe(&self) -> watch::Receiver<Option<T>> {
		self.slot.subscribe()
	}
}

impl<T: Clone> Default for Register<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T: fmt::Debug> fmt::Debug for Register<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Register").field(&*self.slot.borrow()).finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn overwrites_and_notifies() {
		let register = Register::new();
		let mut rx = register.subscribe();

		assert_eq!(register.get(), None);

		register.set(Some(1));
		register.set(Some(2));
		assert_eq!(register.get(), Some(2));

		rx.changed().await.unwrap();
		assert_eq!(*rx.borrow_and_update(), Some(2));

		assert_eq!(register.take(), Some(2));
		assert_eq!(register.get(), None);
	}
}
