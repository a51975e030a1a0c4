use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
	#[error("canonical key must start with '{0}'")]
	MissingPrefix(char),
	#[error("canonical key is not valid base64: {0}")]
	Base64(#[from] base64::DecodeError),
	#[error("invalid identity length <expected='{expected}', found='{found}'>")]
	InvalidLength { expected: usize, found: usize },
}
