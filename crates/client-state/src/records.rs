use p2pong_cache::Keyed;
use p2pong_identity::{CanonicalKey, Identity};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use specta::Type;

/// Ledger timestamp, microseconds since the Unix epoch.
#[derive(
	Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Type,
)]
#[specta(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
	#[must_use]
	pub const fn from_micros(micros: i64) -> Self {
		Self(micros)
	}

	#[must_use]
	pub fn now() -> Self {
		Self(Utc::now().timestamp_micros())
	}

	#[must_use]
	pub const fn as_micros(self) -> i64 {
		self.0
	}

	/// Milliseconds since the epoch, what the UI displays and sorts by.
	#[must_use]
	pub const fn as_millis(self) -> i64 {
		self.0.div_euclid(1000)
	}

	#[must_use]
	pub fn to_datetime(self) -> Option<DateTime<Utc>> {
		DateTime::from_timestamp_micros(self.0)
	}
}

/// One line of the global chat, as pushed by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Type)]
pub struct ChatMessage {
	pub timestamp: Timestamp,
	pub sender: CanonicalKey,
	pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Type)]
pub struct GameInvitation {
	#[specta(type = String)]
	pub game_id: Identity,
	#[specta(type = String)]
	pub inviter: Identity,
	pub message: String,
}

/// Player profile entry as stored on the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
	pub player_key: Identity,
	pub player_name: String,
}

/// What the UI shows for an agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Type)]
pub struct DisplayProfile {
	pub nickname: String,
	pub agent_key: CanonicalKey,
}

impl Keyed for DisplayProfile {
	fn embedded_identity(&self) -> Option<Identity> {
		Some((&self.agent_key).into())
	}
}

/// The profile of the player running this client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Type)]
pub struct PlayerProfile {
	pub nickname: String,
	#[specta(type = String)]
	pub agent_key: Identity,
}

/// Network measurements recorded for a finished game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Type)]
pub struct GameStats {
	#[specta(type = String)]
	pub game_id: Identity,
	#[specta(type = String)]
	pub player_1: Identity,
	#[specta(type = String)]
	pub player_2: Identity,
	pub latency_ms: u64,
	pub time_to_write_score_ms: u64,
	pub time_to_read_score_ms: u64,
	pub created_at: Timestamp,
}

impl Keyed for GameStats {
	fn embedded_identity(&self) -> Option<Identity> {
		Some(self.game_id.clone())
	}
}
