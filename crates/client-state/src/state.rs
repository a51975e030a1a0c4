use crate::{
	backend::{Backend, ProfileFetcher, StatsFetcher},
	buffer::ChatFeed,
	config::ClientConfig,
	invitations::InvitationSet,
	records::{DisplayProfile, GameInvitation, GameStats},
	register::{ActiveGame, LocalPlayer},
	signal::{Ingested, Signal},
};

use p2pong_cache::KeyedCache;
use p2pong_identity::{CanonicalKey, DecodeError, Identity};

use std::sync::Arc;

use tracing::{debug, info, instrument, trace};

pub type ProfileCache = KeyedCache<DisplayProfile, ProfileFetcher>;
pub type StatsCache = KeyedCache<GameStats, StatsFetcher>;

/// Everything the UI reads about remote state during one session.
///
/// Created when the client connects and dropped when it disconnects, nothing survives it.
pub struct ClientState {
	config: ClientConfig,
	profiles: ProfileCache,
	stats: StatsCache,
	chat: ChatFeed,
	invitations: InvitationSet,
	active_game: ActiveGame,
	local_player: LocalPlayer,
}

impl ClientState {
	#[must_use]
	pub fn new(config: ClientConfig, backend: Arc<dyn Backend>) -> Self {
		info!(?config, "starting client state session");

		Self {
			profiles: KeyedCache::new(ProfileFetcher::new(Arc::clone(&backend)), config.profiles),
			stats: KeyedCache::new(StatsFetcher::new(backend), config.stats),
			chat: ChatFeed::new(config.chat_capacity, config.events_capacity),
			invitations: InvitationSet::new(config.events_capacity),
			active_game: ActiveGame::new(),
			local_player: LocalPlayer::new(),
			config,
		}
	}

	#[must_use]
	pub const fn config(&self) -> &ClientConfig {
		&self.config
	}

	#[must_use]
	pub const fn profiles(&self) -> &ProfileCache {
		&self.profiles
	}

	#[must_use]
	pub const fn stats(&self) -> &StatsCache {
		&self.stats
	}

	#[must_use]
	pub const fn chat(&self) -> &ChatFeed {
		&self.chat
	}

	#[must_use]
	pub const fn invitations(&self) -> &InvitationSet {
		&self.invitations
	}

	#[must_use]
	pub const fn active_game(&self) -> &ActiveGame {
		&self.active_game
	}

	#[must_use]
	pub const fn local_player(&self) -> &LocalPlayer {
		&self.local_player
	}

	pub async fn profile(
		&self,
		agent: impl Into<Identity> + Send,
	) -> Result<Option<DisplayProfile>, DecodeError> {
		self.profiles.resolve(agent).await
	}

	pub async fn game_stats(
		&self,
		game_id: impl Into<Identity> + Send,
	) -> Result<Option<GameStats>, DecodeError> {
		self.stats.resolve(game_id).await
	}

	/// Routes a pushed signal into the component that holds its kind of state.
	#[instrument(skip_all)]
	pub fn ingest(&self, signal: Signal) -> Result<Ingested, DecodeError> {
		match signal {
			Signal::GlobalChatMessage(message) => {
				trace!(sender = %message.sender, "chat message");
				self.chat.append(message);
				Ok(Ingested::ChatAppended)
			}

			Signal::GameInvitation {
				game_id,
				inviter,
				message,
			} => {
				let added = self.invitations.add(GameInvitation {
					game_id,
					inviter,
					message,
				})?;

				Ok(if added {
					Ingested::InvitationAdded
				} else {
					Ingested::DuplicateInvitation
				})
			}

			Signal::GameStarted { game_id, .. } => Ok(
				if self.invitations.remove(game_id)?.is_some() {
					Ingested::InvitationSettled
				} else {
					Ingested::Ignored
				},
			),

			Signal::PaddleUpdate { .. }
			| Signal::BallUpdate { .. }
			| Signal::ScoreUpdate { .. }
			| Signal::GameOver { .. } => Ok(Ingested::Ignored),
		}
	}

	pub fn select_game(&self, game_id: impl Into<Identity>) -> Result<(), DecodeError> {
		let key = game_id.into().canonical()?;
		debug!(%key, "game selected");
		self.active_game.set(Some(key));
		Ok(())
	}

	/// Returns the game that was active, if any.
	pub fn leave_game(&self) -> Option<CanonicalKey> {
		let maybe_left = self.active_game.take();
		if let Some(key) = &maybe_left {
			debug!(%key, "left game");
		}
		maybe_left
	}

	/// Drops the pending invitation and makes its game the active one. Joining the game on the
	/// ledger is left to the caller.
	pub fn accept_invitation(
		&self,
		game_id: impl Into<Identity>,
	) -> Result<Option<GameInvitation>, DecodeError> {
		let game_id = game_id.into();
		let maybe_invitation = self.invitations.remove(&game_id)?;

		if maybe_invitation.is_some() {
			self.select_game(game_id)?;
		}

		Ok(maybe_invitation)
	}

	pub fn decline_invitation(
		&self,
		game_id: impl Into<Identity>,
	) -> Result<Option<GameInvitation>, DecodeError> {
		self.invitations.remove(game_id)
	}
}
