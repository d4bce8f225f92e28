use rayon::prelude::*;
use serde::Serialize;

use crate::error::{Result, SelectorError};
use crate::selector::{CryptoHasher, Keccak256, Selector, TextEncoder, Utf8Encoder};

/// Outcome of a search.  A miss is a normal result, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MatchResult {
	Found {
		/// Position of the signature in the candidate list.
		index: usize,
		signature: String,
		selector: Selector,
	},
	NoMatch,
}

impl MatchResult {
	pub fn is_match(&self) -> bool {
		matches!(self, Self::Found { .. })
	}

	pub fn signature(&self) -> Option<&str> {
		match self {
			Self::Found { signature, .. } => Some(signature),
			Self::NoMatch => None,
		}
	}
}

/// Matches candidate error signatures against a target selector.
///
/// Hashing and text encoding are injected so the search logic does not
/// depend on a particular crypto library.
#[derive(Debug, Clone)]
pub struct SelectorFinder<H = Keccak256, E = Utf8Encoder> {
	hasher: H,
	encoder: E,
}

impl Default for SelectorFinder {
	fn default() -> Self {
		Self::new(Keccak256, Utf8Encoder)
	}
}

impl<H: CryptoHasher, E: TextEncoder> SelectorFinder<H, E> {
	pub fn new(hasher: H, encoder: E) -> Self {
		Self { hasher, encoder }
	}

	/// Selector of a single signature.
	pub fn selector_of(&self, signature: &str) -> Result<Selector> {
		if signature.is_empty() {
			return Err(SelectorError::EmptySignature { index: 0 });
		}
		Ok(self.derive(signature))
	}

	/// Return the first signature whose selector equals `target`.
	///
	/// The target and every candidate are validated before anything is
	/// hashed.  Scanning stops at the first hit, so earlier candidates take
	/// precedence and later ones are never hashed.
	pub fn find_match<S: AsRef<str>>(&self, signatures: &[S], target: &str) -> Result<MatchResult> {
		let target: Selector = target.parse()?;
		validate(signatures)?;

		for (index, signature) in signatures.iter().enumerate() {
			let signature = signature.as_ref();
			let selector = self.derive(signature);
			tracing::trace!(%signature, %selector, "hashed candidate");
			if selector == target {
				tracing::debug!(%signature, %selector, index, "selector matched");
				return Ok(MatchResult::Found {
					index,
					signature: signature.to_owned(),
					selector,
				});
			}
		}

		tracing::debug!(%target, candidates = signatures.len(), "no candidate matched");
		Ok(MatchResult::NoMatch)
	}

	/// Same contract as [`find_match`](Self::find_match), with candidates
	/// hashed across the rayon pool.  When several candidates collide on the
	/// target, the one with the lowest index wins.
	pub fn find_match_parallel<S>(&self, signatures: &[S], target: &str) -> Result<MatchResult>
	where
		S: AsRef<str> + Sync,
	{
		let target: Selector = target.parse()?;
		validate(signatures)?;

		let found = signatures
			.par_iter()
			.enumerate()
			.find_map_first(|(index, signature)| {
				let signature = signature.as_ref();
				let selector = self.derive(signature);
				(selector == target).then(|| MatchResult::Found {
					index,
					signature: signature.to_owned(),
					selector,
				})
			});

		match &found {
			Some(hit) => tracing::debug!(signature = ?hit.signature(), "selector matched"),
			None => tracing::debug!(%target, candidates = signatures.len(), "no candidate matched"),
		}
		Ok(found.unwrap_or(MatchResult::NoMatch))
	}

	fn derive(&self, signature: &str) -> Selector {
		let bytes = self.encoder.encode(signature);
		Selector::from_digest(&self.hasher.hash(&bytes))
	}
}

fn validate<S: AsRef<str>>(signatures: &[S]) -> Result<()> {
	match signatures.iter().position(|s| s.as_ref().is_empty()) {
		Some(index) => Err(SelectorError::EmptySignature { index }),
		None => Ok(()),
	}
}

#[cfg(test)]
mod tests {
	use std::borrow::Cow;
	use std::sync::atomic::{AtomicUsize, Ordering};
	use std::sync::Arc;

	use super::*;

	/// Uses the leading input bytes as the digest and counts calls.
	#[derive(Default, Clone)]
	struct CountingHasher {
		calls: Arc<AtomicUsize>,
	}

	impl CryptoHasher for CountingHasher {
		fn hash(&self, data: &[u8]) -> [u8; 32] {
			self.calls.fetch_add(1, Ordering::SeqCst);
			let mut out = [0u8; 32];
			let n = data.len().min(32);
			out[..n].copy_from_slice(&data[..n]);
			out
		}
	}

	/// Upper-cases before encoding, to prove the encoder is consulted.
	struct ShoutingEncoder;

	impl TextEncoder for ShoutingEncoder {
		fn encode<'a>(&self, text: &'a str) -> Cow<'a, [u8]> {
			Cow::Owned(text.to_ascii_uppercase().into_bytes())
		}
	}

	fn keccak_finder() -> SelectorFinder {
		SelectorFinder::default()
	}

	const HEALTHCARE_ERRORS: [&str; 2] = ["UnauthorizedAccess()", "NotPatientOwner()"];

	#[test]
	fn healthcare_candidates_do_not_explain_e2517d3f() {
		let finder = keccak_finder();
		let result = finder.find_match(&HEALTHCARE_ERRORS, "0xe2517d3f").unwrap();
		assert_eq!(result, MatchResult::NoMatch);
	}

	#[test]
	fn finds_access_control_error() {
		let finder = keccak_finder();
		let candidates = [
			"UnauthorizedAccess()",
			"NotPatientOwner()",
			"AccessControlUnauthorizedAccount(address,bytes32)",
		];
		let result = finder.find_match(&candidates, "0xe2517d3f").unwrap();
		assert_eq!(
			result,
			MatchResult::Found {
				index: 2,
				signature: "AccessControlUnauthorizedAccount(address,bytes32)".into(),
				selector: "0xe2517d3f".parse().unwrap(),
			}
		);
	}

	#[test]
	fn first_match_short_circuits() {
		let hasher = CountingHasher::default();
		let calls = hasher.calls.clone();
		let finder = SelectorFinder::new(hasher, Utf8Encoder);

		// Fake digest is the leading bytes, so "abcd" -> 0x61626364.
		let result = finder
			.find_match(&["zzzz()", "abcd()", "abcd(uint256)", "qqqq()"], "0x61626364")
			.unwrap();

		assert_eq!(result.signature(), Some("abcd()"));
		assert_eq!(calls.load(Ordering::SeqCst), 2, "nothing after the hit is hashed");
	}

	#[test]
	fn real_hasher_short_circuits_on_healthcare_list() {
		let finder = keccak_finder();
		let result = finder.find_match(&HEALTHCARE_ERRORS, "0x344fd586").unwrap();
		assert_eq!(result.signature(), Some("UnauthorizedAccess()"));
		assert!(matches!(result, MatchResult::Found { index: 0, .. }));
	}

	#[test]
	fn empty_list_is_no_match() {
		let finder = keccak_finder();
		let none: [&str; 0] = [];
		assert_eq!(finder.find_match(&none, "0xe2517d3f").unwrap(), MatchResult::NoMatch);
		assert_eq!(
			finder.find_match_parallel(&none, "0xe2517d3f").unwrap(),
			MatchResult::NoMatch
		);
	}

	#[test]
	fn earlier_candidate_wins() {
		let finder = keccak_finder();
		let target = finder.selector_of("NotPatientOwner()").unwrap().to_string();
		let result = finder
			.find_match(&["NotPatientOwner()", "UnauthorizedAccess()"], &target)
			.unwrap();
		assert_eq!(result.signature(), Some("NotPatientOwner()"));
	}

	#[test]
	fn target_case_is_ignored() {
		let finder = keccak_finder();
		let candidates = ["Foo()", "AccessControlUnauthorizedAccount(address,bytes32)"];
		assert_eq!(
			finder.find_match(&candidates, "0xE2517D3F").unwrap(),
			finder.find_match(&candidates, "0xe2517d3f").unwrap()
		);
		assert_eq!(
			finder.find_match(&HEALTHCARE_ERRORS, "0xE2517D3F").unwrap(),
			finder.find_match(&HEALTHCARE_ERRORS, "0xe2517d3f").unwrap()
		);
	}

	#[test]
	fn malformed_target_fails_before_hashing() {
		let hasher = CountingHasher::default();
		let calls = hasher.calls.clone();
		let finder = SelectorFinder::new(hasher, Utf8Encoder);

		for bad in ["0x123", "e2517d3f", "0xe2517d3g"] {
			let err = finder.find_match(&HEALTHCARE_ERRORS, bad).unwrap_err();
			assert!(matches!(err, SelectorError::InvalidSelector { .. }), "{bad}");
		}
		assert_eq!(calls.load(Ordering::SeqCst), 0);
	}

	#[test]
	fn empty_signature_fails_before_hashing() {
		let hasher = CountingHasher::default();
		let calls = hasher.calls.clone();
		let finder = SelectorFinder::new(hasher, Utf8Encoder);

		let err = finder
			.find_match(&["abcd()", "", "efgh()"], "0x61626364")
			.unwrap_err();
		assert_eq!(err, SelectorError::EmptySignature { index: 1 });
		assert_eq!(calls.load(Ordering::SeqCst), 0);
	}

	#[test]
	fn encoder_is_used() {
		let finder = SelectorFinder::new(CountingHasher::default(), ShoutingEncoder);
		// "abcd" is upper-cased to "ABCD" = 0x41424344 before hashing.
		let result = finder.find_match(&["abcd()"], "0x41424344").unwrap();
		assert!(result.is_match());
	}

	#[test]
	fn parallel_agrees_with_sequential() {
		let finder = keccak_finder();
		let mut candidates: Vec<String> = (0..2_000).map(|i| format!("Candidate{i}(uint256)")).collect();
		candidates.push("AccessControlUnauthorizedAccount(address,bytes32)".into());

		let seq = finder.find_match(&candidates, "0xe2517d3f").unwrap();
		let par = finder.find_match_parallel(&candidates, "0xe2517d3f").unwrap();
		assert_eq!(seq, par);
		assert!(matches!(par, MatchResult::Found { index: 2_000, .. }));
	}

	#[test]
	fn parallel_prefers_lowest_index() {
		let finder = SelectorFinder::new(CountingHasher::default(), Utf8Encoder);
		let mut candidates: Vec<String> = (0..500).map(|i| format!("x{i:03}()")).collect();
		candidates[40] = "abcd(uint8)".into();
		candidates[10] = "abcd()".into();
		candidates[400] = "abcd(bool)".into();

		let result = finder.find_match_parallel(&candidates, "0x61626364").unwrap();
		assert!(matches!(result, MatchResult::Found { index: 10, .. }));
	}

	#[test]
	fn match_result_json_shape() {
		let found = MatchResult::Found {
			index: 0,
			signature: "acceptOwnership()".into(),
			selector: "0x79ba5097".parse().unwrap(),
		};
		let json = serde_json::to_value(&found).unwrap();
		assert_eq!(json["outcome"], "found");
		assert_eq!(json["selector"], "0x79ba5097");
		assert_eq!(
			serde_json::to_value(MatchResult::NoMatch).unwrap()["outcome"],
			"no_match"
		);
	}
}
