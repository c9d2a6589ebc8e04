//! Cache contract for installation tokens and the built-in in-memory backend.

pub mod memory;

pub use memory::MemoryCache;

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, InstallationId},
};

/// Internally synchronized map from installation to its latest token.
///
/// Implementations must be safe to call from many threads at once without any locking by the
/// caller. Readers observe either the previous or the newly stored token, never a torn value, and
/// the last [`set`](Self::set) for an installation wins. Entries are only ever replaced, never
/// evicted.
pub trait TokenCache
where
	Self: Send + Sync,
{
	/// Returns the token stored for `installation`, expired or not.
	fn get(&self, installation: InstallationId) -> Option<AccessToken>;

	/// Stores `token` for `installation`, replacing any previous value.
	fn set(&self, installation: InstallationId, token: AccessToken);
}
impl<T> TokenCache for Arc<T>
where
	T: ?Sized + TokenCache,
{
	fn get(&self, installation: InstallationId) -> Option<AccessToken> {
		T::get(self, installation)
	}

	fn set(&self, installation: InstallationId, token: AccessToken) {
		T::set(self, installation, token)
	}
}
