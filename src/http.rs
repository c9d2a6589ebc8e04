//! Transport seam shared by the token issuer and the decorating transport.
//!
//! [`HttpTransport`] is the crate's only dependency on an HTTP stack. The app-authenticated
//! transport handed to [`StaticTokenSource`](crate::source::StaticTokenSource), the downstream
//! transport wrapped by [`InstallationTransport`](crate::transport::InstallationTransport), and the
//! decorator itself all speak it, so any of them can be swapped without touching the others.
//! Bodies are buffered: a response handed back by a transport owns its body until it is dropped.

// std
use std::ops::Deref;
// self
use crate::_prelude::*;

/// Media type sent in the `Accept` header of every request.
pub const MEDIA_TYPE: &str = "application/vnd.github.v3+json";
/// Default scheme and host of the API.
pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Request type accepted by [`HttpTransport`].
pub type HttpRequest = ::http::Request<Vec<u8>>;
/// Response type produced by [`HttpTransport`].
pub type HttpResponse = ::http::Response<Vec<u8>>;

/// Boxed future returned by [`HttpTransport::round_trip`].
pub type TransportFuture<'a, E> =
	Pin<Box<dyn Future<Output = Result<HttpResponse, E>> + 'a + Send>>;

/// Anything that can submit a request and hand back a response or an error.
///
/// Implementations must be `Send + Sync + 'static` so a single transport can be shared across
/// installations and tasks, and the futures they return must be `Send`. Deadlines, retries, and
/// connection reuse are the implementation's business; nothing above this trait adds its own.
pub trait HttpTransport
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the transport.
	type Error: 'static + Send + Sync + StdError;

	/// Submits `request` and resolves to the response, whatever its status.
	fn round_trip(&self, request: HttpRequest) -> TransportFuture<'_, Self::Error>;
}
impl<T> HttpTransport for Arc<T>
where
	T: ?Sized + HttpTransport,
{
	type Error = T::Error;

	fn round_trip(&self, request: HttpRequest) -> TransportFuture<'_, Self::Error> {
		T::round_trip(self, request)
	}
}

/// [`HttpTransport`] backed by a [`ReqwestClient`].
///
/// The client is cloned per request (cheap, it is reference counted), so one `ReqwestTransport`
/// should be shared between installations to reuse connections.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestTransport {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestTransport {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl HttpTransport for ReqwestTransport {
	type Error = ReqwestError;

	fn round_trip(&self, request: HttpRequest) -> TransportFuture<'_, Self::Error> {
		let client = self.0.clone();

		Box::pin(async move {
			let response = client.execute(request.try_into()?).await?;
			let status = response.status();
			let version = response.version();
			let headers = response.headers().to_owned();
			let mut buffered = HttpResponse::new(response.bytes().await?.to_vec());

			*buffered.status_mut() = status;
			*buffered.version_mut() = version;
			*buffered.headers_mut() = headers;

			Ok(buffered)
		})
	}
}
