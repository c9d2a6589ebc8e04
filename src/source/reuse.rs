//! Caching token source keyed by installation.
//!
//! [`ReuseTokenSource`] answers from its [`TokenCache`] while the cached token is outside the
//! one-minute expiry margin and otherwise asks the wrapped source for a new one. Failed refreshes
//! are returned unchanged and never cached; the previous entry stays in place.
//!
//! # Concurrent refreshes
//!
//! By default nothing coordinates callers that miss the cache for the same installation at the
//! same time: each of them calls the wrapped source and the last token stored wins. Every one of
//! those tokens is valid, so this only costs extra endpoint calls. Call
//! [`ReuseTokenSource::with_singleflight`] to collapse concurrent misses for one installation into
//! a single call; other installations are never held up by it.

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, InstallationId},
	http::HttpTransport,
	obs::{self, FlowOutcome, FlowSpan, TokenFlow},
	source::{CacheMetrics, StaticTokenSource, TokenFuture, TokenSource},
	store::{MemoryCache, TokenCache},
	transport::AppsTransport,
};

type FlowGuards = Arc<Mutex<HashMap<InstallationId, Arc<AsyncMutex<()>>>>>;

/// Token source that reuses cached tokens until they are about to expire.
#[derive(Clone)]
pub struct ReuseTokenSource {
	source: Arc<dyn TokenSource>,
	cache: Arc<dyn TokenCache>,
	metrics: Arc<CacheMetrics>,
	flow_guards: Option<FlowGuards>,
}
impl ReuseTokenSource {
	/// Wraps `source` with a fresh [`MemoryCache`].
	pub fn new(source: impl 'static + TokenSource) -> Self {
		Self::with_source(Arc::new(source))
	}

	/// Wraps an already shared source with a fresh [`MemoryCache`].
	pub fn with_source(source: Arc<dyn TokenSource>) -> Self {
		Self {
			source,
			cache: Arc::new(MemoryCache::default()),
			metrics: Default::default(),
			flow_guards: None,
		}
	}

	/// Caches tokens issued through `apps` by a [`StaticTokenSource`].
	pub fn from_apps_transport<S>(apps: AppsTransport<S>) -> Self
	where
		S: ?Sized + HttpTransport,
	{
		Self::new(StaticTokenSource::new(apps))
	}

	/// Replaces the cache backend.
	pub fn with_cache(mut self, cache: Arc<dyn TokenCache>) -> Self {
		self.cache = cache;

		self
	}

	/// Collapses concurrent cache misses for the same installation into one refresh.
	pub fn with_singleflight(mut self) -> Self {
		self.flow_guards = Some(Default::default());

		self
	}

	/// Cache backend holding the latest token per installation.
	pub fn cache(&self) -> &Arc<dyn TokenCache> {
		&self.cache
	}

	/// Counters for hits, refreshes, and failed refreshes.
	pub fn metrics(&self) -> &CacheMetrics {
		&self.metrics
	}

	/// Returns (and creates on demand) the singleflight guard for an installation.
	fn flow_guard(&self, installation: InstallationId) -> Option<Arc<AsyncMutex<()>>> {
		let guards = self.flow_guards.as_ref()?;
		let mut guards = guards.lock();

		Some(guards.entry(installation).or_insert_with(|| Arc::new(AsyncMutex::new(()))).clone())
	}

	async fn reuse_or_refresh(&self, installation: InstallationId) -> Result<AccessToken> {
		const FLOW: TokenFlow = TokenFlow::Reuse;

		let guard = self.flow_guard(installation);
		let _singleflight = match &guard {
			Some(guard) => Some(guard.lock().await),
			None => None,
		};

		if let Some(current) = self.cache.get(installation).filter(|token| !token.is_expired()) {
			self.metrics.record_hit();
			obs::record_flow_outcome(FLOW, FlowOutcome::CacheHit);

			return Ok(current);
		}

		self.metrics.record_refresh();

		let fresh = self.source.token(installation).await.inspect_err(|_| {
			self.metrics.record_failure();
		})?;

		self.cache.set(installation, fresh.clone());

		Ok(fresh)
	}
}
impl TokenSource for ReuseTokenSource {
	fn token(&self, installation: InstallationId) -> TokenFuture<'_> {
		const FLOW: TokenFlow = TokenFlow::Reuse;

		Box::pin(async move {
			let span = FlowSpan::new(FLOW, installation);

			obs::record_flow_outcome(FLOW, FlowOutcome::Attempt);

			let result = span.instrument(self.reuse_or_refresh(installation)).await;

			match &result {
				Ok(_) => obs::record_flow_outcome(FLOW, FlowOutcome::Success),
				Err(_) => obs::record_flow_outcome(FLOW, FlowOutcome::Failure),
			}

			result
		})
	}
}
impl Debug for ReuseTokenSource {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ReuseTokenSource")
			.field("metrics", &self.metrics)
			.field("singleflight", &self.flow_guards.is_some())
			.finish()
	}
}
