use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::{Result, SelectorError};

/// Byte length of an ABI selector.
pub const SELECTOR_LEN: usize = 4;

// -- Capabilities --

/// A 256-bit cryptographic hash.  Selectors are derived from Keccak-256,
/// but the finder only needs this narrow surface so tests can swap in a
/// fake.
pub trait CryptoHasher: Send + Sync {
	fn hash(&self, data: &[u8]) -> [u8; 32];
}

/// Turns signature text into the bytes that get hashed.
pub trait TextEncoder: Send + Sync {
	fn encode<'a>(&self, text: &'a str) -> Cow<'a, [u8]>;
}

/// Keccak-256 as used by the EVM (not NIST SHA3-256).
#[derive(Debug, Default, Clone, Copy)]
pub struct Keccak256;

impl CryptoHasher for Keccak256 {
	fn hash(&self, data: &[u8]) -> [u8; 32] {
		alloy_primitives::keccak256(data).0
	}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Utf8Encoder;

impl TextEncoder for Utf8Encoder {
	fn encode<'a>(&self, text: &'a str) -> Cow<'a, [u8]> {
		// Rust strings are already UTF-8.
		Cow::Borrowed(text.as_bytes())
	}
}

// -- Selector --

/// The first four bytes of a signature hash.  Renders as `0x` followed by
/// eight lowercase hex digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Selector([u8; SELECTOR_LEN]);

impl Selector {
	/// Truncate a full 32-byte digest to its selector.
	pub fn from_digest(digest: &[u8; 32]) -> Self {
		let mut out = [0u8; SELECTOR_LEN];
		out.copy_from_slice(&digest[..SELECTOR_LEN]);
		Self(out)
	}

	pub fn as_bytes(&self) -> &[u8; SELECTOR_LEN] {
		&self.0
	}
}

impl fmt::Display for Selector {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "0x{}", hex::encode(self.0))
	}
}

impl FromStr for Selector {
	type Err = SelectorError;

	/// Parse a caller-supplied target.  Hex digits may be in either case;
	/// the `0x` prefix is mandatory.
	fn from_str(s: &str) -> Result<Self> {
		let invalid = |reason| SelectorError::InvalidSelector {
			input: s.to_owned(),
			reason,
		};

		let digits = s
			.strip_prefix("0x")
			.or_else(|| s.strip_prefix("0X"))
			.ok_or_else(|| invalid("missing 0x prefix"))?;
		if digits.len() != SELECTOR_LEN * 2 {
			return Err(invalid("expected exactly 8 hex digits"));
		}
		if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
			return Err(invalid("contains non-hex characters"));
		}

		let mut out = [0u8; SELECTOR_LEN];
		hex::decode_to_slice(digits, &mut out)
			.map_err(|_| invalid("contains non-hex characters"))?;
		Ok(Self(out))
	}
}

impl Serialize for Selector {
	fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		serializer.collect_str(self)
	}
}

/// Compute a signature's selector with Keccak-256 over its UTF-8 bytes.
pub fn selector_of(signature: &str) -> Result<Selector> {
	<crate::finder::SelectorFinder>::default().selector_of(signature)
}
