//! Numeric identifiers for GitHub Apps and their installations.

// std
use std::num::ParseIntError;
// self
use crate::_prelude::*;

macro_rules! def_id {
	($name:ident, $doc:literal, $kind:literal) => {
		#[doc = $doc]
		///
		/// Any value is accepted; whether it names a real entity is decided server-side.
		#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(i64);
		impl $name {
			/// Wraps a raw identifier.
			pub const fn new(value: i64) -> Self {
				Self(value)
			}

			/// Returns the raw identifier.
			pub const fn get(self) -> i64 {
				self.0
			}
		}
		impl From<i64> for $name {
			fn from(value: i64) -> Self {
				Self(value)
			}
		}
		impl From<$name> for i64 {
			fn from(value: $name) -> Self {
				value.0
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				write!(f, concat!($kind, "({})"), self.0)
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				Display::fmt(&self.0, f)
			}
		}
		impl std::str::FromStr for $name {
			type Err = ParseIntError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				s.trim().parse().map(Self)
			}
		}
	};
}

def_id! { AppId, "Identifier of a registered GitHub App.", "App" }
def_id! { InstallationId, "Identifier of one installation of a GitHub App; the token cache key.", "Installation" }

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn identifiers_format_and_parse() {
		let installation: InstallationId =
			" 4242 ".parse().expect("Installation identifier should parse from digits.");

		assert_eq!(installation.get(), 4242);
		assert_eq!(installation.to_string(), "4242");
		assert_eq!(format!("{installation:?}"), "Installation(4242)");
		assert_eq!(format!("{:?}", AppId::new(7)), "App(7)");
		assert!("forty-two".parse::<InstallationId>().is_err());
	}

	#[test]
	fn identifiers_accept_any_value() {
		assert_eq!(InstallationId::from(-1).get(), -1);
		assert_eq!(i64::from(AppId::new(0)), 0);
	}

	#[test]
	fn serde_is_transparent() {
		let installation: InstallationId =
			serde_json::from_str("99").expect("Installation identifier should deserialize.");

		assert_eq!(installation, InstallationId::new(99));
		assert_eq!(
			serde_json::to_string(&installation).expect("Identifier should serialize."),
			"99"
		);

		let map: HashMap<InstallationId, u8> = HashMap::from_iter([(installation, 1_u8)]);

		assert_eq!(map.get(&InstallationId::new(99)), Some(&1));
	}
}
