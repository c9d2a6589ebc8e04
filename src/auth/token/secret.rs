//! Redacting wrapper for installation token values.

// self
use crate::_prelude::*;

/// Installation token value that stays out of logs and debug output.
///
/// Formatting keeps the kind prefix GitHub puts on its tokens (`ghs_` for installation tokens) so
/// logs still tell token kinds apart; everything after it is redacted.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenSecret(String);
impl TokenSecret {
	/// Wraps a raw token value.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the raw token. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Returns `true` when the endpoint handed back an empty token.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Kind prefix such as `ghs`, if the value carries one.
	pub fn kind_prefix(&self) -> Option<&str> {
		let (prefix, rest) = self.0.split_once('_')?;

		(!rest.is_empty()
			&& (2..=4).contains(&prefix.len())
			&& prefix.bytes().all(|b| b.is_ascii_lowercase()))
		.then_some(prefix)
	}
}
impl Debug for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("TokenSecret").field(&format_args!("{self}")).finish()
	}
}
impl Display for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self.kind_prefix() {
			Some(prefix) => write!(f, "{prefix}_<redacted>"),
			None => f.write_str("<redacted>"),
		}
	}
}
