use crate::{config::DEFAULT_EVENTS_CAPACITY, records::GameInvitation};

use p2pong_identity::{CanonicalKey, DecodeError, Identity};

use std::{
	fmt,
	sync::{Mutex, MutexGuard, PoisonError},
};

use tokio::sync::broadcast;
use tracing::debug;

#[derive(Debug, Clone)]
pub enum InvitationEvent {
	Added(GameInvitation),
	Removed(GameInvitation),
}

/// Live invitations, at most one per game.
///
/// Deduplication and removal are keyed on the canonical form of the game id, so the same
/// invitation pushed twice, or once as bytes and once as text, is stored once. The first copy
/// received is the one kept.
pub struct InvitationSet {
	entries: Mutex<Vec<(CanonicalKey, GameInvitation)>>,
	events: broadcast::Sender<InvitationEvent>,
}

impl InvitationSet {
	#[must_use]
	pub fn new(events_capacity: usize) -> Self {
		Self {
			entries: Mutex::new(Vec::new()),
			events: broadcast::channel(events_capacity.max(1)).0,
		}
	}

	/// Returns whether the invitation was stored. `false` means one for the same game already was.
	pub fn add(&self, invitation: GameInvitation) -> Result<bool, DecodeError> {
		let key = invitation.game_id.canonical()?;

		{
			let mut entries = self.lock();
			if entries.iter().any(|(existing, _)| *existing == key) {
				debug!(%key, "already holding an invitation for this game, ignoring");
				return Ok(false);
			}
			entries.push((key.clone(), invitation.clone()));
		}

		debug!(%key, "invitation added");
		self.emit(InvitationEvent::Added(invitation));

		Ok(true)
	}

	/// Removing a game with no pending invitation is a no-op.
	pub fn remove(
		&self,
		game_id: impl Into<Identity>,
	) -> Result<Option<GameInvitation>, DecodeError> {
		let key = game_id.into().canonical()?;

		let maybe_removed = {
			let mut entries = self.lock();
			entries
				.iter()
				.position(|(existing, _)| *existing == key)
				.map(|idx| entries.remove(idx).1)
		};

		if let Some(removed) = &maybe_removed {
			debug!(%key, "invitation removed");
			self.emit(InvitationEvent::Removed(removed.clone()));
		} else {
			debug!(%key, "no invitation to remove");
		}

		Ok(maybe_removed)
	}

	#[must_use]
	pub fn list(&self) -> Vec<GameInvitation> {
		self.lock()
			.iter()
			.map(|(_, invitation)| invitation.clone())
			.collect()
	}

	pub fn get(&self, game_id: impl Into<Identity>) -> Result<Option<GameInvitation>, DecodeError> {
		let key = game_id.into().canonical()?;

		Ok(self
			.lock()
			.iter()
			.find(|(existing, _)| *existing == key)
			.map(|(_, invitation)| invitation.clone()))
	}

	pub fn contains(&self, game_id: impl Into<Identity>) -> Result<bool, DecodeError> {
		self.get(game_id).map(|maybe_invitation| maybe_invitation.is_some())
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
	pub fn subscribe(&self) -> broadcast::Receiver<InvitationEvent> {
		self.events.subscribe()
	}

	fn lock(&self) -> MutexGuard<'_, Vec<(CanonicalKey, GameInvitation)>> {
		self.entries.lock().unwrap_or_else(PoisonError::into_inner)
	}

	fn emit(&self, event: InvitationEvent) {
		if self.events.receiver_count() > 0 {
			self.events.send(event).ok();
		}
	}
}

impl Default for InvitationSet {
	fn default() -> Self {
		Self::new(DEFAULT_EVENTS_CAPACITY)
	}
}

impl fmt::Debug for InvitationSet {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("InvitationSet")
			.field("len", &self.len())
			.finish()
	}
}
