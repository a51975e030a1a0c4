//! Lazy, deduplicated resolution of remote entities by identity.
//!
//! A [`KeyedCache`] sits between UI code that wants a value *now* and a [`Fetcher`] that can only
//! get it asynchronously from the ledger backend. Concurrent lookups of the same unresolved key
//! collapse into a single fetch; what the other callers do meanwhile is chosen per cache through
//! [`InFlightPolicy`].

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

mod cache;
mod config;
mod error;

pub use cache::{CacheEvent, EntryState, Fetcher, Keyed, KeyedCache};
pub use config::{CacheConfig, InFlightPolicy};
pub use error::FetchError;
