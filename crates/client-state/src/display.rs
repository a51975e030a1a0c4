//! Short, human-viewable renderings of identities.
//!
//! These never fail: anything that cannot be shown turns into a fixed placeholder, since a broken
//! key must not break the view that tries to print it.

use p2pong_identity::Identity;

use tracing::debug;

pub const DEFAULT_PREFIX_LEN: usize = 8;
pub const DEFAULT_SUFFIX_LEN: usize = 6;

/// Shown for identities that do not decode.
pub const INVALID_KEY: &str = "Invalid Key";
/// Shown when there is no identity at all.
pub const NO_KEY: &str = "N/A";

const ELLIPSIS: &str = "...";

/// Keeps the first `prefix_len` and last `suffix_len` characters of the canonical form.
///
/// Keys short enough that truncating would not save anything come back whole.
#[must_use]
pub fn truncate_key(
	maybe_identity: Option<&Identity>,
	prefix_len: usize,
	suffix_len: usize,
) -> String {
	let Some(identity) = maybe_identity else {
		return NO_KEY.to_owned();
	};

	let key = match identity.canonical() {
		Ok(key) => key,
		Err(e) => {
			debug!(?e, "identity can't be displayed");
			return INVALID_KEY.to_owned();
		}
	};

	let text = key.as_str();
	if text.len()
		<= prefix_len
			.saturating_add(suffix_len)
			.saturating_add(ELLIPSIS.len())
	{
		return key.into_string();
	}

	// Canonical keys are ASCII, so byte offsets are char boundaries
	format!(
		"{}{ELLIPSIS}{}",
		&text[..prefix_len],
		&text[text.len() - suffix_len..]
	)
}

#[must_use]
pub fn truncate_key_default(maybe_identity: Option<&Identity>) -> String {
	truncate_key(maybe_identity, DEFAULT_PREFIX_LEN, DEFAULT_SUFFIX_LEN)
}
