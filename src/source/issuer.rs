//! Pass-through token source that performs one token endpoint exchange per call.

// crates.io
use ::http::{
	Method, Request,
	header::{ACCEPT, CONTENT_TYPE},
};
// self
use crate::{
	_prelude::*,
	auth::{AccessToken, InstallationId, InstallationTokenOptions, options},
	error::{ConfigError, DecodeError, HttpError},
	http::{HttpTransport, MEDIA_TYPE},
	obs::{self, FlowOutcome, FlowSpan, TokenFlow},
	source::{TokenFuture, TokenSource},
	transport::AppsTransport,
};

/// Exchanges an installation identifier for a fresh [`AccessToken`] on every call.
///
/// Requests go through the app-authenticated transport of an [`AppsTransport`]. Nothing is cached;
/// wrap the source in a [`ReuseTokenSource`](crate::source::ReuseTokenSource) to reuse tokens.
pub struct StaticTokenSource<S>
where
	S: ?Sized + HttpTransport,
{
	apps: AppsTransport<S>,
	options: Option<InstallationTokenOptions>,
}
impl<S> StaticTokenSource<S>
where
	S: ?Sized + HttpTransport,
{
	/// Creates a source that requests unrestricted tokens through `apps`.
	pub fn new(apps: AppsTransport<S>) -> Self {
		Self { apps, options: None }
	}

	/// Restricts every token issued by this source to `options`.
	pub fn with_options(mut self, options: InstallationTokenOptions) -> Self {
		self.options = Some(options);

		self
	}

	/// Options sent with each token request, if any.
	pub fn options(&self) -> Option<&InstallationTokenOptions> {
		self.options.as_ref()
	}

	/// App-authenticated transport and coordinates used for token requests.
	pub fn apps_transport(&self) -> &AppsTransport<S> {
		&self.apps
	}

	async fn issue(&self, installation: InstallationId) -> Result<AccessToken> {
		let body = options::encode_body(self.options.as_ref())?;
		let url = self.apps.access_tokens_url(installation)?;
		let mut builder = Request::builder()
			.method(Method::POST)
			.uri(url.as_str())
			.header(ACCEPT, MEDIA_TYPE);

		if body.is_some() {
			builder = builder.header(CONTENT_TYPE, "application/json");
		}

		let request = builder.body(body.unwrap_or_default()).map_err(ConfigError::from)?;
		let response = match self.apps.transport.round_trip(request).await {
			Ok(response) => response,
			Err(e) => return Err(HttpError::transport(installation, url, e).into()),
		};

		if !response.status().is_success() {
			return Err(HttpError::unexpected_status(installation, url, response).into());
		}

		// The response (and its body) is released when it goes out of scope after decoding.
		Ok(decode_token(response.body())?)
	}
}
impl<S> TokenSource for StaticTokenSource<S>
where
	S: ?Sized + HttpTransport,
{
	fn token(&self, installation: InstallationId) -> TokenFuture<'_> {
		const FLOW: TokenFlow = TokenFlow::Issue;

		Box::pin(async move {
			let span = FlowSpan::new(FLOW, installation);

			obs::record_flow_outcome(FLOW, FlowOutcome::Attempt);

			let result = span.instrument(self.issue(installation)).await;

			match &result {
				Ok(_) => obs::record_flow_outcome(FLOW, FlowOutcome::Success),
				Err(_) => obs::record_flow_outcome(FLOW, FlowOutcome::Failure),
			}

			result
		})
	}
}
impl<S> Debug for StaticTokenSource<S>
where
	S: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("StaticTokenSource")
			.field("apps", &self.apps)
			.field("options", &self.options)
			.finish()
	}
}

/// Decodes a token endpoint body, reporting the JSON path on failure.
pub(crate) fn decode_token(body: &[u8]) -> Result<AccessToken, DecodeError> {
	let mut deserializer = serde_json::Deserializer::from_slice(body);

	serde_path_to_error::deserialize(&mut deserializer).map_err(|source| DecodeError { source })
}
