use p2pong_identity::DecodeError;

use thiserror::Error;

/// Failure of a remote lookup. Always treated as transient by the cache.
#[derive(Debug, Error)]
pub enum FetchError {
	#[error("backend call failed: {0}")]
	Backend(String),
	/// The backend answered with an entry it could not decode.
	#[error("malformed remote entry: {0}")]
	MalformedEntry(String),
	#[error(transparent)]
	Decode(#[from] DecodeError),
}
