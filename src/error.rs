use thiserror::Error;

/// Input rejected before any hashing takes place.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
	#[error("error signature at position {index} is empty")]
	EmptySignature { index: usize },

	#[error("invalid selector {input:?}: {reason}")]
	InvalidSelector { input: String, reason: &'static str },
}

pub type Result<T> = std::result::Result<T, SelectorError>;
