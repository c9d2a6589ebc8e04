//! App-level coordinates and the installation-scoped request decorator.
//!
//! [`AppsTransport`] bundles the externally supplied, app-authenticated transport (the one that
//! signs requests with the app's JWT) with the API base URL and app identifier. It is only used
//! for token requests.
//!
//! [`InstallationTransport`] wraps any other [`HttpTransport`] and authenticates every request it
//! forwards as one installation. It implements [`HttpTransport`] itself, so it drops in wherever a
//! plain transport is expected.

// crates.io
use ::http::{
	HeaderValue,
	header::{ACCEPT, AUTHORIZATION},
};
// self
use crate::{
	_prelude::*,
	auth::{AccessToken, AppId, InstallationId},
	error::ConfigError,
	http::{
		DEFAULT_BASE_URL, HttpRequest, HttpResponse, HttpTransport, MEDIA_TYPE, TransportFuture,
	},
	obs::{self, FlowOutcome, FlowSpan, TokenFlow},
	source::TokenSource,
};

/// App-authenticated transport plus the coordinates needed to request installation tokens.
pub struct AppsTransport<S>
where
	S: ?Sized + HttpTransport,
{
	/// Scheme and host of the API, e.g. `https://api.github.com`.
	pub base_url: String,
	/// Identifier of the app the transport authenticates as.
	pub app_id: AppId,
	/// Transport that signs each request as the app.
	pub transport: Arc<S>,
}
impl<S> AppsTransport<S>
where
	S: ?Sized + HttpTransport,
{
	/// Creates an apps transport targeting [`DEFAULT_BASE_URL`].
	pub fn new(transport: Arc<S>, app_id: AppId) -> Self {
		Self { base_url: DEFAULT_BASE_URL.into(), app_id, transport }
	}

	/// Points token requests at another API host (e.g. GitHub Enterprise Server).
	pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self, ConfigError> {
		let base_url = base_url.into();

		parse_http_url(&base_url, &base_url)?;

		self.base_url = base_url;

		Ok(self)
	}

	/// Token endpoint for `installation`.
	///
	/// A trailing `/` on the base URL is ignored.
	pub fn access_tokens_url(&self, installation: InstallationId) -> Result<Url, ConfigError> {
		let base = self.base_url.trim_end_matches('/');

		parse_http_url(
			&format!("{base}/app/installations/{installation}/access_tokens"),
			&self.base_url,
		)
	}
}
impl<S> Clone for AppsTransport<S>
where
	S: ?Sized + HttpTransport,
{
	fn clone(&self) -> Self {
		Self {
			base_url: self.base_url.clone(),
			app_id: self.app_id,
			transport: Arc::clone(&self.transport),
		}
	}
}
impl<S> Debug for AppsTransport<S>
where
	S: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AppsTransport")
			.field("base_url", &self.base_url)
			.field("app_id", &self.app_id)
			.finish()
	}
}

/// Transport that authenticates every forwarded request as one installation.
///
/// Before forwarding, [`round_trip`](HttpTransport::round_trip) fetches a token from the configured
/// [`TokenSource`], sets `Authorization: token <value>` (replacing any existing value), and adds
/// the API media type to `Accept` next to whatever the caller put there. If no token can be
/// obtained the request is not sent. Responses and downstream errors are returned as they are; no
/// retries happen here.
///
/// The wrapped transport should be shared between installations so connections are reused.
/// `round_trip` is safe to call concurrently.
pub struct InstallationTransport<T>
where
	T: ?Sized + HttpTransport,
{
	base_url: String,
	app_id: AppId,
	installation_id: InstallationId,
	transport: Arc<T>,
	token_source: Arc<dyn TokenSource>,
}
impl<T> InstallationTransport<T>
where
	T: ?Sized + HttpTransport,
{
	/// Creates a transport for `installation_id` that forwards to `transport`.
	pub fn new(
		transport: Arc<T>,
		app_id: AppId,
		installation_id: InstallationId,
		token_source: Arc<dyn TokenSource>,
	) -> Self {
		Self { base_url: DEFAULT_BASE_URL.into(), app_id, installation_id, transport, token_source }
	}

	/// Creates a transport that shares base URL and app identifier with `apps`.
	pub fn from_apps_transport<S>(
		apps: &AppsTransport<S>,
		transport: Arc<T>,
		installation_id: InstallationId,
		token_source: Arc<dyn TokenSource>,
	) -> Self
	where
		S: ?Sized + HttpTransport,
	{
		Self {
			base_url: apps.base_url.clone(),
			..Self::new(transport, apps.app_id, installation_id, token_source)
		}
	}

	/// Scheme and host of the API this transport talks to.
	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	/// App the installation belongs to.
	pub fn app_id(&self) -> AppId {
		self.app_id
	}

	/// Installation every request is authenticated as.
	pub fn installation_id(&self) -> InstallationId {
		self.installation_id
	}

	/// Returns a valid token for the installation, refreshing it if the source decides to.
	pub async fn token(&self) -> Result<AccessToken> {
		self.token_source.token(self.installation_id).await
	}

	async fn decorate_and_forward(&self, mut request: HttpRequest) -> Result<HttpResponse> {
		let token = self.token().await?;

		authorize(&mut request, &token)?;

		self.transport.round_trip(request).await.map_err(Error::downstream)
	}
}
impl<T> HttpTransport for InstallationTransport<T>
where
	T: ?Sized + HttpTransport,
{
	type Error = Error;

	fn round_trip(&self, request: HttpRequest) -> TransportFuture<'_, Self::Error> {
		const FLOW: TokenFlow = TokenFlow::RoundTrip;

		Box::pin(async move {
			let span = FlowSpan::new(FLOW, self.installation_id);

			obs::record_flow_outcome(FLOW, FlowOutcome::Attempt);

			let result = span.instrument(self.decorate_and_forward(request)).await;

			match &result {
				Ok(_) => obs::record_flow_outcome(FLOW, FlowOutcome::Success),
				Err(_) => obs::record_flow_outcome(FLOW, FlowOutcome::Failure),
			}

			result
		})
	}
}
impl<T> Debug for InstallationTransport<T>
where
	T: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("InstallationTransport")
			.field("base_url", &self.base_url)
			.field("app_id", &self.app_id)
			.field("installation_id", &self.installation_id)
			.finish()
	}
}

/// Sets the installation credentials on `request`.
fn authorize(request: &mut HttpRequest, token: &AccessToken) -> Result<(), ConfigError> {
	let mut authorization = HeaderValue::from_str(&token.authorization())?;

	authorization.set_sensitive(true);

	let headers = request.headers_mut();

	headers.insert(AUTHORIZATION, authorization);
	headers.append(ACCEPT, HeaderValue::from_static(MEDIA_TYPE));

	Ok(())
}

fn parse_http_url(raw: &str, base_url: &str) -> Result<Url, ConfigError> {
	let url = Url::parse(raw)
		.map_err(|source| ConfigError::InvalidBaseUrl { url: base_url.to_owned(), source })?;

	if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
		return Err(ConfigError::UnsupportedBaseUrl { url: base_url.to_owned() });
	}

	Ok(url)
}
