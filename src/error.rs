//! Crate-level error types shared by token sources and transports.

// self
use crate::{_prelude::*, auth::InstallationId, http::HttpResponse};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Type-erased error raised by a pluggable transport.
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Canonical error exposed by public APIs.
///
/// Nothing in the crate retries on its own; every variant reaches the caller of
/// [`TokenSource::token`](crate::source::TokenSource::token) or
/// [`HttpTransport::round_trip`](crate::http::HttpTransport::round_trip) unchanged.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem detected before any network call.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Token request failed in transit or was answered with a non-2xx status.
	#[error(transparent)]
	Http(Box<HttpError>),
	/// Token endpoint answered 2xx with a body that is not an access token.
	#[error(transparent)]
	Decode(#[from] DecodeError),
	/// The wrapped transport failed while forwarding a decorated request.
	///
	/// Displays as the wrapped error and exposes it through `source()` for downcasting.
	#[error("{0}")]
	Downstream(#[source] BoxError),
}
impl Error {
	/// Wraps an error produced by the transport a decorated request was forwarded to.
	pub fn downstream(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::Downstream(Box::new(src))
	}

	/// Returns the HTTP failure record, if this error carries one.
	pub fn as_http(&self) -> Option<&HttpError> {
		match self {
			Self::Http(e) => Some(e.as_ref()),
			_ => None,
		}
	}

	/// Status code of the token endpoint's response, when one was received.
	pub fn status(&self) -> Option<u16> {
		self.as_http().and_then(HttpError::status)
	}
}
impl From<HttpError> for Error {
	fn from(e: HttpError) -> Self {
		Self::Http(Box::new(e))
	}
}

/// Configuration and request construction failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Base URL cannot be parsed or joined with the token endpoint path.
	#[error("Base URL `{url}` is invalid.")]
	InvalidBaseUrl {
		/// Offending URL.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Base URL parses but cannot host API paths (non-HTTP scheme, `mailto:` style URL, ...).
	#[error("Base URL `{url}` must be an absolute http(s) URL.")]
	UnsupportedBaseUrl {
		/// Offending URL.
		url: String,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] ::http::Error),
	/// Token contains bytes that are not allowed in a header value.
	#[error("Access token cannot be used as a header value.")]
	InvalidHeaderValue(#[from] ::http::header::InvalidHeaderValue),
	/// Token request options could not be serialized.
	#[error("Installation token options could not be encoded as JSON.")]
	EncodeOptions {
		/// Serialization failure.
		#[source]
		source: serde_json::Error,
	},
}

/// Failure record for the token request, preserving everything needed to diagnose it.
///
/// Exactly one of [`source`](Self::source) and [`response`](Self::response) is set: transport
/// failures carry the underlying error, non-2xx answers carry the full response. The response body
/// belongs to this record and stays readable until the record is dropped.
#[derive(ThisError)]
#[error("{message}")]
pub struct HttpError {
	/// Human-readable summary.
	pub message: String,
	/// Underlying signing or network error, if the request never produced a response.
	#[source]
	pub source: Option<BoxError>,
	/// Installation the token was requested for.
	pub installation_id: InstallationId,
	/// Token endpoint URL that was called.
	pub url: String,
	/// Raw response (status, headers, body) for non-2xx answers.
	pub response: Option<HttpResponse>,
}
impl HttpError {
	/// Builds a record for a request that failed before a response arrived.
	pub fn transport(
		installation_id: InstallationId,
		url: impl Into<String>,
		src: impl 'static + Send + Sync + StdError,
	) -> Self {
		Self {
			message: format!(
				"Could not get an access token for installation {installation_id}: {src}."
			),
			source: Some(Box::new(src)),
			installation_id,
			url: url.into(),
			response: None,
		}
	}

	/// Builds a record for a non-2xx response, taking ownership of it.
	pub fn unexpected_status(
		installation_id: InstallationId,
		url: impl Into<String>,
		response: HttpResponse,
	) -> Self {
		let url = url.into();

		Self {
			message: format!(
				"Received non-2xx response status \"{}\" when fetching {url}.",
				response.status()
			),
			source: None,
			installation_id,
			url,
			response: Some(response),
		}
	}

	/// Status code of the response, if one was received.
	pub fn status(&self) -> Option<u16> {
		self.response.as_ref().map(|response| response.status().as_u16())
	}

	/// Raw response body, if one was received.
	pub fn body(&self) -> Option<&[u8]> {
		self.response.as_ref().map(|response| response.body().as_slice())
	}

	/// Response body decoded as UTF-8 (lossily), if one was received.
	pub fn body_text(&self) -> Option<String> {
		self.body().map(|body| String::from_utf8_lossy(body).into_owned())
	}

	/// Takes the response out of the record, leaving `None` behind.
	pub fn take_response(&mut self) -> Option<HttpResponse> {
		self.response.take()
	}
}
impl Debug for HttpError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("HttpError")
			.field("message", &self.message)
			.field("source", &self.source)
			.field("installation_id", &self.installation_id)
			.field("url", &self.url)
			.field("status", &self.status())
			.field("body_len", &self.body().map(<[u8]>::len))
			.finish()
	}
}

/// A 2xx token response whose body does not decode as an access token.
#[derive(Debug, ThisError)]
#[error("Token endpoint returned a malformed access token: {source}.")]
pub struct DecodeError {
	/// Structured parsing failure, including the JSON path that failed.
	#[source]
	pub source: serde_path_to_error::Error<serde_json::Error>,
}
impl DecodeError {
	/// JSON path at which decoding failed.
	pub fn path(&self) -> String {
		self.source.path().to_string()
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::io;
	// self
	use super::*;

	fn response(status: u16, body: &str) -> HttpResponse {
		let mut response = HttpResponse::new(body.as_bytes().to_vec());

		*response.status_mut() =
			::http::StatusCode::from_u16(status).expect("Fixture status should be valid.");

		response
	}

	#[test]
	fn transport_failure_keeps_source_and_installation() {
		let err = HttpError::transport(
			InstallationId::new(7),
			"https://api.github.com/app/installations/7/access_tokens",
			io::Error::new(io::ErrorKind::ConnectionReset, "connection reset"),
		);

		assert!(err.response.is_none());
		assert_eq!(err.installation_id, InstallationId::new(7));
		assert!(err.to_string().contains("installation 7"));

		let source = StdError::source(&err).expect("Transport failures should expose a source.");

		assert_eq!(source.to_string(), "connection reset");
	}

	#[test]
	fn status_failure_keeps_response_readable() {
		let err = HttpError::unexpected_status(
			InstallationId::new(8),
			"https://api.github.com/app/installations/8/access_tokens",
			response(403, "{\"message\":\"Forbidden\"}"),
		);
		let wrapped = Error::from(err);

		assert_eq!(wrapped.status(), Some(403));
		assert!(wrapped.to_string().contains("403 Forbidden"));

		let record = wrapped.as_http().expect("Status failures should be HTTP errors.");

		assert!(StdError::source(record).is_none());
		assert_eq!(record.body_text().as_deref(), Some("{\"message\":\"Forbidden\"}"));

		let Error::Http(mut record) = wrapped else { panic!("Expected an HTTP failure record.") };
		let response = record.take_response().expect("The response should be taken once.");

		assert_eq!(response.status().as_u16(), 403);
		assert_eq!(response.body().as_slice(), b"{\"message\":\"Forbidden\"}");
		assert!(record.take_response().is_none());
		assert!(record.status().is_none());
		assert!(record.body().is_none());
	}

	#[test]
	fn downstream_errors_keep_display_and_source() {
		let err = Error::downstream(io::Error::new(io::ErrorKind::BrokenPipe, "socket closed"));

		assert_eq!(err.to_string(), "socket closed");
		assert!(err.status().is_none());

		let source = StdError::source(&err).expect("Downstream errors should expose a source.");
		let io_err =
			source.downcast_ref::<io::Error>().expect("The source should be the transport error.");

		assert_eq!(io_err.kind(), io::ErrorKind::BrokenPipe);
	}
}
