use crate::DecodeError;

use std::{fmt, str::FromStr};

use base64::{engine::general_purpose, Engine};
use serde::{Deserialize, Serialize};
use specta::Type;

/// Length in bytes of every raw ledger identity: a 3 byte type prefix, the 32 byte core hash and a
/// 4 byte location suffix. The codec never looks inside, it only enforces the length.
pub const HASH_LEN: usize = 39;

/// Leading character of the text form, the multibase tag for url-safe unpadded base64.
pub const CANONICAL_PREFIX: char = 'u';

/// Encodes a raw identity into its canonical text form.
pub fn to_canonical(bytes: &[u8]) -> Result<CanonicalKey, DecodeError> {
	check_len(bytes.len())?;

	let mut encoded = String::with_capacity(1 + (HASH_LEN * 4).div_ceil(3));
	encoded.push(CANONICAL_PREFIX);
	general_purpose::URL_SAFE_NO_PAD.encode_string(bytes, &mut encoded);

	Ok(CanonicalKey(encoded))
}

/// Decodes a canonical text form back into the raw identity bytes.
///
/// Decoding is strict (no padding, no stray trailing bits), so for any string this accepts,
/// encoding the result gives back the exact same string.
pub fn from_canonical(key: &str) -> Result<Vec<u8>, DecodeError> {
	let encoded = key
		.strip_prefix(CANONICAL_PREFIX)
		.ok_or(DecodeError::MissingPrefix(CANONICAL_PREFIX))?;

	let bytes = general_purpose::URL_SAFE_NO_PAD.decode(encoded)?;
	check_len(bytes.len())?;

	Ok(bytes)
}

const fn check_len(found: usize) -> Result<(), DecodeError> {
	if found == HASH_LEN {
		Ok(())
	} else {
		Err(DecodeError::InvalidLength {
			expected: HASH_LEN,
			found,
		})
	}
}

/// Normalized, comparable text form of an identity.
///
/// Only obtainable through the codec, so holding one means the string is well formed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Type)]
#[specta(transparent)]
pub struct CanonicalKey(String);

impl CanonicalKey {
	#[must_use]
	pub fn as_str(&self) -> &str {
		&self.0
	}

	#[must_use]
	pub fn into_string(self) -> String {
		self.0
	}

	#[must_use]
	pub fn to_bytes(&self) -> Vec<u8> {
		// Construction already proved the string decodes
		general_purpose::URL_SAFE_NO_PAD
			.decode(&self.0[CANONICAL_PREFIX.len_utf8()..])
			.unwrap_or_default()
	}
}

impl fmt::Display for CanonicalKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl AsRef<str> for CanonicalKey {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl FromStr for CanonicalKey {
	type Err = DecodeError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		from_canonical(s)?;
		Ok(Self(s.to_owned()))
	}
}

impl TryFrom<String> for CanonicalKey {
	type Error = DecodeError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		from_canonical(&value)?;
		Ok(Self(value))
	}
}

impl TryFrom<&[u8]> for CanonicalKey {
	type Error = DecodeError;

	fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
		to_canonical(value)
	}
}

impl<'de> Deserialize<'de> for CanonicalKey {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		String::deserialize(deserializer)?
			.try_into()
			.map_err(serde::de::Error::custom)
	}
}

/// An identity exactly as a caller holds it.
///
/// Nothing is validated on construction; [`Identity::canonical`] is the normalization step every
/// API taking an `Identity` runs before touching state.
#[derive(Debug, Clone)]
pub enum Identity {
	Raw(Vec<u8>),
	Canonical(String),
}

impl Identity {
	pub fn canonical(&self) -> Result<CanonicalKey, DecodeError> {
		match self {
			Self::Raw(bytes) => to_canonical(bytes),
			Self::Canonical(key) => key.parse(),
		}
	}

	pub fn to_bytes(&self) -> Result<Vec<u8>, DecodeError> {
		match self {
			Self::Raw(bytes) => {
				check_len(bytes.len())?;
				Ok(bytes.clone())
			}
			Self::Canonical(key) => from_canonical(key),
		}
	}
}

/// Identities are equal when they name the same bytes, whatever their representation. Malformed
/// identities only equal a structurally identical malformed identity.
impl PartialEq for Identity {
	fn eq(&self, other: &Self) -> bool {
		match (self.canonical(), other.canonical()) {
			(Ok(this), Ok(that)) => this == that,
			(Err(_), Err(_)) => match (self, other) {
				(Self::Raw(this), Self::Raw(that)) => this == that,
				(Self::Canonical(this), Self::Canonical(that)) => this == that,
				_ => false,
			},
			_ => false,
		}
	}
}

impl Eq for Identity {}

impl From<CanonicalKey> for Identity {
	fn from(key: CanonicalKey) -> Self {
		Self::Canonical(key.0)
	}
}

impl From<&CanonicalKey> for Identity {
	fn from(key: &CanonicalKey) -> Self {
		Self::Canonical(key.0.clone())
	}
}

impl From<Vec<u8>> for Identity {
	fn from(bytes: Vec<u8>) -> Self {
		Self::Raw(bytes)
	}
}

impl From<&[u8]> for Identity {
	fn from(bytes: &[u8]) -> Self {
		Self::Raw(bytes.to_vec())
	}
}

impl From<String> for Identity {
	fn from(key: String) -> Self {
		Self::Canonical(key)
	}
}

impl From<&str> for Identity {
	fn from(key: &str) -> Self {
		Self::Canonical(key.to_owned())
	}
}

impl From<&Self> for Identity {
	fn from(identity: &Self) -> Self {
		identity.clone()
	}
}

impl Serialize for Identity {
	fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let key = self.canonical().map_err(serde::ser::Error::custom)?;
		serializer.serialize_str(key.as_str())
	}
}

impl<'de> Deserialize<'de> for Identity {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		#[derive(Deserialize)]
		#[serde(untagged)]
		enum Repr {
			Text(String),
			Bytes(Vec<u8>),
		}

		let identity = match Repr::deserialize(deserializer)? {
			Repr::Text(key) => Self::Canonical(key),
			Repr::Bytes(bytes) => Self::Raw(bytes),
		};

		identity.canonical().map_err(serde::de::Error::custom)?;

		Ok(identity)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn agent_bytes(seed: u8) -> Vec<u8> {
		let mut bytes = vec![0x84, 0x20, 0x24];
		bytes.extend((0..HASH_LEN - 3).map(|i| seed.wrapping_add(u8::try_from(i).unwrap_or(0))));
		bytes
	}

	#[test]
	fn round_trips_both_ways() {
		for seed in [0, 1, 7, 0x7f, 0xfe, 0xff] {
			let bytes = agent_bytes(seed);
			let key = to_canonical(&bytes).unwrap();

			assert_eq!(from_canonical(key.as_str()).unwrap(), bytes);
			assert_eq!(to_canonical(&from_canonical(key.as_str()).unwrap()).unwrap(), key);
			assert_eq!(key.to_bytes(), bytes);
		}
	}

	#[test]
	fn canonical_form_shape() {
		let key = to_canonical(&agent_bytes(3)).unwrap();

		assert!(key.as_str().starts_with(CANONICAL_PREFIX));
		assert_eq!(key.as_str().len(), 53);
		assert!(!key.as_str().contains(['+', '/', '=']));
	}

	#[test]
	fn rejects_wrong_length() {
		assert_eq!(
			to_canonical(&[1, 2, 3]),
			Err(DecodeError::InvalidLength {
				expected: HASH_LEN,
				found: 3
			})
		);

		let short = format!("u{}", general_purpose::URL_SAFE_NO_PAD.encode([9; 32]));
		assert!(matches!(
			from_canonical(&short),
			Err(DecodeError::InvalidLength { found: 32, .. })
		));
	}

	#[test]
	fn rejects_malformed_text() {
		let key = to_canonical(&agent_bytes(5)).unwrap();

		assert_eq!(
			from_canonical(&key.as_str()[1..]),
			Err(DecodeError::MissingPrefix('u'))
		);
		assert!(matches!(
			from_canonical("u!!not-base64!!"),
			Err(DecodeError::Base64(_))
		));
		assert!("".parse::<CanonicalKey>().is_err());
	}

	#[test]
	fn conversions_validate() {
		let bytes = agent_bytes(9);
		let key = CanonicalKey::try_from(bytes.as_slice()).unwrap();

		assert_eq!(key, to_canonical(&bytes).unwrap());
		assert_eq!(CanonicalKey::try_from(key.clone().into_string()).unwrap(), key);
		assert!(CanonicalKey::try_from(&bytes[1..]).is_err());
		assert!(CanonicalKey::try_from(String::from("uAAAA")).is_err());
	}

	#[test]
	fn equal_bytes_in_separate_buffers_are_equal_identities() {
		let raw_a = Identity::from(agent_bytes(42));
		let raw_b = Identity::from(agent_bytes(42));
		let text = Identity::from(to_canonical(&agent_bytes(42)).unwrap());

		assert_eq!(raw_a, raw_b);
		assert_eq!(raw_a, text);
		assert_ne!(raw_a, Identity::from(agent_bytes(43)));
		assert_ne!(Identity::Raw(vec![1]), Identity::Canonical("x".into()));
	}

	#[test]
	fn serde_uses_canonical_text() {
		let bytes = agent_bytes(11);
		let key = to_canonical(&bytes).unwrap();

		let json = serde_json::to_string(&Identity::Raw(bytes.clone())).unwrap();
		assert_eq!(json, format!("\"{key}\""));

		let from_text: Identity = serde_json::from_str(&json).unwrap();
		let from_bytes: Identity = serde_json::from_value(serde_json::json!(bytes)).unwrap();
		assert_eq!(from_text, from_bytes);

		assert!(serde_json::from_str::<CanonicalKey>("\"uAAAA\"").is_err());
		assert!(serde_json::to_string(&Identity::Raw(vec![0; 4])).is_err());
	}
}
