use serde::{Deserialize, Serialize};

/// What a `resolve` call does when another caller is already fetching the same key.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InFlightPolicy {
	/// Suspend until the in-flight fetch settles and return its outcome.
	#[default]
	Wait,
	/// Return `None` right away, the caller is expected to ask again later.
	ReturnPending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
	#[serde(default)]
	pub in_flight: InFlightPolicy,
	/// Buffered events per subscriber before slow subscribers start lagging.
	#[serde(default = "default_events_capacity")]
	pub events_capacity: usize,
}

const fn default_events_capacity() -> usize {
	64
}

impl Default for CacheConfig {
	fn default() -> Self {
		Self {
			in_flight: InFlightPolicy::default(),
			events_capacity: default_events_capacity(),
		}
	}
}
