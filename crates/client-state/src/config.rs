use crate::buffer::DEFAULT_CHAT_CAPACITY;

use p2pong_cache::CacheConfig;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_EVENTS_CAPACITY: usize = 64;

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("invalid client config: {0}")]
	Json(#[from] serde_json::Error),
}

/// Tunables for a [`ClientState`](crate::ClientState) session. Every field is optional when
/// deserializing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
	/// How many chat messages are kept, oldest dropped first.
	#[serde(default = "default_chat_capacity")]
	pub chat_capacity: usize,
	#[serde(default)]
	pub profiles: CacheConfig,
	#[serde(default)]
	pub stats: CacheConfig,
	/// Buffered events per subscriber of the chat feed and invitation set.
	#[serde(default = "default_events_capacity")]
	pub events_capacity: usize,
}

const fn default_chat_capacity() -> usize {
	DEFAULT_CHAT_CAPACITY
}

const fn default_events_capacity() -> usize {
	DEFAULT_EVENTS_CAPACITY
}

impl Default for ClientConfig {
	fn default() -> Self {
		Self {
			chat_capacity: DEFAULT_CHAT_CAPACITY,
			profiles: CacheConfig::default(),
			stats: CacheConfig::default(),
			events_capacity: DEFAULT_EVENTS_CAPACITY,
		}
	}
}

impl ClientConfig {
	pub fn from_json(json: &str) -> Result<Self, ConfigError> {
		serde_json::from_str(json).map_err(Into::into)
	}
}
