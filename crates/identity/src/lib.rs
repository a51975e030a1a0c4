//! Identity codec for the p2pong client.
//!
//! Every entity the ledger backend knows about (agents, games, statistics records) is addressed by
//! a fixed-length binary hash. UI code receives those hashes sometimes as raw bytes and sometimes
//! already encoded as text, so everything that compares or stores identities goes through
//! [`CanonicalKey`], the one text form that is equal whenever the underlying bytes are equal.

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

mod error;
mod key;

pub use error::DecodeError;
pub use key::{from_canonical, to_canonical, CanonicalKey, Identity, CANONICAL_PREFIX, HASH_LEN};
