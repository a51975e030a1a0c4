use crate::records::{DisplayProfile, GameStats, Player};

use p2pong_cache::{FetchError, Fetcher};
use p2pong_identity::CanonicalKey;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

/// Point lookups offered by the ledger backend. Transport, retries and timeouts are the
/// implementor's business.
#[async_trait]
pub trait Backend: Send + Sync {
	async fn get_player_profile_by_agent_key(
		&self,
		agent_key: &CanonicalKey,
	) -> Result<Option<Player>, FetchError>;

	async fn get_game_stats_for_game(
		&self,
		game_id: &CanonicalKey,
	) -> Result<Option<GameStats>, FetchError>;
}

pub struct ProfileFetcher(Arc<dyn Backend>);

impl ProfileFetcher {
	#[must_use]
	pub fn new(backend: Arc<dyn Backend>) -> Self {
		Self(backend)
	}
}

#[async_trait]
impl Fetcher<DisplayProfile> for ProfileFetcher {
	async fn fetch(&self, key: &CanonicalKey) -> Result<Option<DisplayProfile>, FetchError> {
		let Some(player) = self.0.get_player_profile_by_agent_key(key).await? else {
			return Ok(None);
		};

		let agent_key = player.player_key.canonical().unwrap_or_else(|e| {
			warn!(?e, %key, "player entry carries a malformed key, using the requested key");
			key.clone()
		});

		Ok(Some(DisplayProfile {
			nickname: player.player_name,
			agent_key,
		}))
	}
}

pub struct StatsFetcher(Arc<dyn Backend>);

impl StatsFetcher {
	#[must_use]
	pub fn new(backend: Arc<dyn Backend>) -> Self {
		Self(backend)
	}
}

#[async_trait]
impl Fetcher<GameStats> for StatsFetcher {
	async fn fetch(&self, key: &CanonicalKey) -> Result<Option<GameStats>, FetchError> {
		self.0.get_game_stats_for_game(key).await
	}
}
