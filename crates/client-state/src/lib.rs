//!
//! # p2pong client state
//!
//! The state layer between the game UI and the ledger backend. The backend is slow, asynchronous
//! and happy to deliver the same push more than once; the UI wants synchronous, deduplicated and
//! bounded views. This crate owns those views for the duration of a session:
//! - agent profiles and per-game statistics, fetched on demand through single-flight caches;
//! - the global chat, capped to the newest messages;
//! - pending game invitations, one per game no matter how often they are pushed;
//! - the active game and the local player's profile.
//!
//! Pushed [`Signal`]s go through [`ClientState::ingest`], lookups through
//! [`ClientState::profile`] and [`ClientState::game_stats`]. Every component can also be
//! subscribed to for change notifications.

#![warn(
	clippy::all,
	clippy::pedantic,
	clippy::correctness,
	clippy::perf,
	clippy::style,
	clippy::suspicious,
	clippy::complexity,
	clippy::nursery,
	clippy::unwrap_used,
	unused_qualifications,
	rust_2018_idioms,
	trivial_casts,
	trivial_numeric_casts,
	unused_allocation,
	clippy::unnecessary_cast,
	clippy::cast_lossless,
	clippy::cast_possible_truncation,
	clippy::cast_possible_wrap,
	clippy::cast_precision_loss,
	clippy::cast_sign_loss,
	clippy::dbg_macro,
	clippy::deprecated_cfg_attr,
	clippy::separated_literal_suffix,
	deprecated
)]
#![forbid(deprecated_in_future)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

mod backend;
mod buffer;
mod config;
pub mod display;
mod invitations;
mod records;
mod register;
mod signal;
mod state;

pub use backend::{Backend, ProfileFetcher, StatsFetcher};
pub use buffer::{BoundedBuffer, BufferEvent, ChatFeed, DEFAULT_CHAT_CAPACITY};
pub use config::{ClientConfig, ConfigError, DEFAULT_EVENTS_CAPACITY};
pub use invitations::{InvitationEvent, InvitationSet};
pub use records::{
	ChatMessage, DisplayProfile, GameInvitation, GameStats, Player, PlayerProfile, Timestamp,
};
pub use register::{ActiveGame, LocalPlayer, Register};
pub use signal::{Ingested, Signal};
pub use state::{ClientState, ProfileCache, StatsCache};

pub use p2pong_cache::{CacheConfig, CacheEvent, EntryState, FetchError, InFlightPolicy};
pub use p2pong_identity::{CanonicalKey, DecodeError, Identity};
