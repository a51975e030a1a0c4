use crate::{CacheConfig, FetchError, InFlightPolicy};

use p2pong_identity::{CanonicalKey, DecodeError, Identity};

use std::{
	collections::HashMap,
	fmt,
	sync::{Mutex, MutexGuard, PoisonError},
};

use async_trait::async_trait;
use tokio::sync::{broadcast, watch};
use tracing::{debug, instrument, trace, warn};

/// Values that carry the identity of the entity they describe.
pub trait Keyed {
	fn embedded_identity(&self) -> Option<Identity>;
}

/// Remote point lookup backing a [`KeyedCache`].
#[async_trait]
pub trait Fetcher<V>: Send + Sync {
	/// `Ok(None)` means the backend answered and there is no such entity.
	async fn fetch(&self, key: &CanonicalKey) -> Result<Option<V>, FetchError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryState {
	Absent,
	Fetching,
	Resolved,
	Missing,
}

/// Published once per key, when it reaches a terminal state.
#[derive(Debug, Clone)]
pub enum CacheEvent<V> {
	Resolved { key: CanonicalKey, value: V },
	Missing { key: CanonicalKey },
}

#[derive(Clone)]
enum Settled<V> {
	Pending,
	Resolved(V),
	Missing,
	Failed,
}

impl<V: Clone> Settled<V> {
	fn value(&self) -> Option<V> {
		match self {
			Self::Resolved(value) => Some(value.clone()),
			Self::Pending | Self::Missing | Self::Failed => None,
		}
	}
}

enum Slot<V> {
	Fetching(watch::Receiver<Settled<V>>),
	Resolved(V),
	Missing,
}

type Slots<V> = HashMap<CanonicalKey, Slot<V>>;

enum Step<V> {
	Done(Option<V>),
	Pending,
	Wait(watch::Receiver<Settled<V>>),
	Fetch(watch::Sender<Settled<V>>),
}

fn lock<V>(slots: &Mutex<Slots<V>>) -> MutexGuard<'_, Slots<V>> {
	slots.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Get-or-fetch cache with at most one outstanding fetch per key.
///
/// Entries never expire: a key that resolved or was confirmed missing is never fetched again for
/// the lifetime of the cache. Fetch failures leave the key absent so a later call may retry.
pub struct KeyedCache<V, F> {
	fetcher: F,
	config: CacheConfig,
	slots: Mutex<Slots<V>>,
	events: broadcast::Sender<CacheEvent<V>>,
}

impl<V, F> KeyedCache<V, F>
where
	V: Keyed + Clone + Send + Sync + 'static,
	F: Fetcher<V>,
{
	pub fn new(fetcher: F, config: CacheConfig) -> Self {
		Self {
			fetcher,
			config,
			slots: Mutex::new(HashMap::new()),
			events: broadcast::channel(config.events_capacity.max(1)).0,
		}
	}

	/// Resolves an identity in either representation.
	///
	/// Malformed identities are reported to the caller. Every other outcome that is not a value
	/// (missing, failed, or in flight under [`InFlightPolicy::ReturnPending`]) is `Ok(None)`.
	pub async fn resolve(
		&self,
		identity: impl Into<Identity> + Send,
	) -> Result<Option<V>, DecodeError> {
		let key = identity.into().canonical()?;
		Ok(self.resolve_key(&key).await)
	}

	#[instrument(skip_all, fields(%key))]
	pub async fn resolve_key(&self, key: &CanonicalKey) -> Option<V> {
		// Deciding who fetches happens under the same lock acquisition as the state read
		let step = {
			let mut slots = lock(&self.slots);
			match slots.get(key) {
				Some(Slot::Resolved(value)) => Step::Done(Some(value.clone())),
				Some(Slot::Missing) => Step::Done(None),
				Some(Slot::Fetching(rx)) => match self.config.in_flight {
					InFlightPolicy::Wait => Step::Wait(rx.clone()),
					InFlightPolicy::ReturnPending => Step::Pending,
				},
				None => {
					let (tx, rx) = watch::channel(Settled::Pending);
					slots.insert(key.clone(), Slot::Fetching(rx));
					Step::Fetch(tx)
				}
			}
		};

		match step {
			Step::Done(maybe_value) => {
				trace!("served from cache");
				maybe_value
			}
			Step::Pending => {
				debug!("fetch already in flight, not waiting for it");
				None
			}
			Step::Wait(rx) => {
				debug!("fetch already in flight, waiting for it to settle");
				wait_settled(rx).await
			}
			Step::Fetch(tx) => self.fetch_and_store(key, tx).await,
		}
	}

	async fn fetch_and_store(
		&self,
		key: &CanonicalKey,
		tx: watch::Sender<Settled<V>>,
	) -> Option<V> {
		let mut in_flight = InFlight {
			slots: &self.slots,
			key,
			maybe_tx: Some(tx),
		};

		debug!("not cached, fetching");

		match self.fetcher.fetch(key).await {
			Ok(Some(value)) => {
				check_embedded_identity(key, &value);

				in_flight.settle(
					Some(Slot::Resolved(value.clone())),
					Settled::Resolved(value.clone()),
				);
				self.emit(CacheEvent::Resolved {
					key: key.clone(),
					value: value.clone(),
				});

				Some(value)
			}
			Ok(None) => {
				debug!("backend has no such entity");

				in_flight.settle(Some(Slot::Missing), Settled::Missing);
				self.emit(CacheEvent::Missing { key: key.clone() });

				None
			}
			Err(e) => {
				warn!(?e, "fetch failed, key left absent for a later retry");

				in_flight.settle(None, Settled::Failed);

				None
			}
		}
	}

	/// Synchronous peek, never fetches.
	pub fn get(&self, identity: impl Into<Identity>) -> Result<Option<V>, DecodeError> {
		let key = identity.into().canonical()?;

		Ok(match lock(&self.slots).get(&key) {
			Some(Slot::Resolved(value)) => Some(value.clone()),
			_ => None,
		})
	}

	pub fn state(&self, identity: impl Into<Identity>) -> Result<EntryState, DecodeError> {
		let key = identity.into().canonical()?;

		Ok(match lock(&self.slots).get(&key) {
			None => EntryState::Absent,
			Some(Slot::Fetching(_)) => EntryState::Fetching,
			Some(Slot::Resolved(_)) => EntryState::Resolved,
			Some(Slot::Missing) => EntryState::Missing,
		})
	}

	/// Number of keys in a terminal state.
	pub fn len(&self) -> usize {
		lock(&self.slots)
			.values()
			.filter(|slot| !matches!(slot, Slot::Fetching(_)))
			.count()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub const fn config(&self) -> CacheConfig {
		self.config
	}

	pub fn subscribe(&self) -> broadcast::Receiver<CacheEvent<V>> {
		self.events.subscribe()
	}

	fn emit(&self, event: CacheEvent<V>) {
		if self.events.receiver_count() > 0 {
			self.events.send(event).ok();
		}
	}
}

impl<V, F> fmt::Debug for KeyedCache<V, F> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("KeyedCache")
			.field("config", &self.config)
			.field("entries", &lock(&self.slots).len())
			.finish_non_exhaustive()
	}
}

/// Owns the `Fetching` slot of a key until the fetch settles.
///
/// If the fetching future is dropped early the key goes back to absent and waiters are released.
struct InFlight<'a, V> {
	slots: &'a Mutex<Slots<V>>,
	key: &'a CanonicalKey,
	maybe_tx: Option<watch::Sender<Settled<V>>>,
}

impl<V> InFlight<'_, V> {
	fn settle(&mut self, maybe_slot: Option<Slot<V>>, outcome: Settled<V>) {
		{
			let mut slots = lock(self.slots);
			if let Some(slot) = maybe_slot {
				slots.insert(self.key.clone(), slot);
			} else {
				slots.remove(self.key);
			}
		}

		if let Some(tx) = self.maybe_tx.take() {
			tx.send_replace(outcome);
		}
	}
}

impl<V> Drop for InFlight<'_, V> {
	fn drop(&mut self) {
		if self.maybe_tx.is_some() {
			warn!(key = %self.key, "fetch dropped before settling, key left absent");
			self.settle(None, Settled::Failed);
		}
	}
}

async fn wait_settled<V: Clone>(mut rx: watch::Receiver<Settled<V>>) -> Option<V> {
	match rx
		.wait_for(|settled| !matches!(settled, Settled::Pending))
		.await
	{
		Ok(settled) => settled.value(),
		Err(_) => None,
	}
}

fn check_embedded_identity<V: Keyed>(key: &CanonicalKey, value: &V) {
	let Some(identity) = value.embedded_identity() else {
		return;
	};

	match identity.canonical() {
		Ok(embedded) if embedded == *key => {}
		Ok(embedded) => warn!(
			%embedded,
			"fetched entity reports a different identity, stored under the requested key"
		),
		Err(e) => warn!(
			?e,
			"fetched entity carries a malformed identity, stored under the requested key"
		),
	}
}
