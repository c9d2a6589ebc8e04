//! Token sources: the pass-through issuer and the caching decorator that composes it.
//!
//! Both implement [`TokenSource`], so a transport can be handed either one without changing. Use
//! [`StaticTokenSource`] directly when every call should hit the token endpoint, or wrap it in
//! [`ReuseTokenSource`] (the usual choice) to reuse tokens until they are about to expire.

pub mod issuer;
pub mod reuse;

mod metrics;

pub use issuer::StaticTokenSource;
pub use metrics::CacheMetrics;
pub use reuse::ReuseTokenSource;

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, InstallationId},
};

/// Boxed future returned by [`TokenSource::token`].
pub type TokenFuture<'a> = Pin<Box<dyn Future<Output = Result<AccessToken>> + 'a + Send>>;

/// Produces a valid access token for an installation.
pub trait TokenSource
where
	Self: Send + Sync,
{
	/// Returns a token for `installation`, or the error that prevented obtaining one.
	fn token(&self, installation: InstallationId) -> TokenFuture<'_>;
}
impl<T> TokenSource for Arc<T>
where
	T: ?Sized + TokenSource,
{
	fn token(&self, installation: InstallationId) -> TokenFuture<'_> {
		T::token(self, installation)
	}
}
