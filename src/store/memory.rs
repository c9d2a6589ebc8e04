//! Thread-safe in-process [`TokenCache`].

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, InstallationId},
	store::TokenCache,
};

type CacheMap = Arc<RwLock<HashMap<InstallationId, AccessToken>>>;

/// Token cache that keeps the latest token per installation in process memory.
///
/// Locks are held only for the map lookup or insert itself, never across a network call, so
/// installations do not wait on each other's refreshes. Clones share the same map.
#[derive(Clone, Debug, Default)]
pub struct MemoryCache(CacheMap);
impl MemoryCache {
	/// Number of installations with a cached token.
	pub fn len(&self) -> usize {
		self.0.read().len()
	}

	/// Returns `true` if no token has been cached yet.
	pub fn is_empty(&self) -> bool {
		self.0.read().is_empty()
	}
}
impl TokenCache for MemoryCache {
	fn get(&self, installation: InstallationId) -> Option<AccessToken> {
		self.0.read().get(&installation).cloned()
	}

	fn set(&self, installation: InstallationId, token: AccessToken) {
		self.0.write().insert(installation, token);
	}
}
