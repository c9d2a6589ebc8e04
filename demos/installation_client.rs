//! Walks through the installation token chain against a local mock of the API.
//!
//! 1. Wrap a shared [`ReqwestTransport`] in a signer that attaches the app JWT (a fixed string
//!    here; a real app signs one with its private key).
//! 2. Build an [`AppsTransport`] pointing at the mock server and a [`ReuseTokenSource`] on top.
//! 3. Decorate the same shared transport with an [`InstallationTransport`] and send requests.
//! 4. Inspect the cache counters and a rejected token request.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use installation_token::{
	auth::{AppId, InstallationId},
	http::{HttpRequest, HttpTransport, ReqwestTransport, TransportFuture},
	http_types::{HeaderValue, Request, header::AUTHORIZATION},
	reqwest::Error as ReqwestError,
	source::{ReuseTokenSource, TokenSource},
	transport::{AppsTransport, InstallationTransport},
};

const INSTALLATION: InstallationId = InstallationId::new(4242);

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(POST)
				.path(format!("/app/installations/{INSTALLATION}/access_tokens"))
				.header("authorization", "Bearer demo-app-jwt");
			then.status(201).header("content-type", "application/json").body(
				"{\"token\":\"ghs_demo\",\"expires_at\":\"2099-01-01T00:00:00Z\",\
				 \"permissions\":{\"contents\":\"read\"},\"repository_selection\":\"all\"}",
			);
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(POST).path("/app/installations/1/access_tokens");
			then.status(404).body("{\"message\":\"Not Found\"}");
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/installation/repositories")
				.header("authorization", "token ghs_demo");
			then.status(200).body("{\"total_count\":1,\"repositories\":[{\"name\":\"demo\"}]}");
		})
		.await;

	let shared = Arc::new(ReqwestTransport::default());
	let apps = AppsTransport::new(Arc::new(DemoSigner(Arc::clone(&shared))), AppId::new(1))
		.with_base_url(server.base_url())?;
	let source = Arc::new(ReuseTokenSource::from_apps_transport(apps.clone()).with_singleflight());
	let transport =
		InstallationTransport::from_apps_transport(&apps, shared, INSTALLATION, source.clone());
	let url = format!("{}/installation/repositories", transport.base_url());

	for attempt in 1..=2 {
		let response =
			transport.round_trip(Request::builder().uri(&url).body(Vec::new())?).await?;

		println!(
			"Request {attempt} answered {} with {}.",
			response.status(),
			String::from_utf8_lossy(response.body())
		);
	}

	let token = transport.token().await?;

	println!("Cached token for {INSTALLATION} expires at {}.", token.expires_at);
	println!(
		"Cache counters: {} hits, {} refreshes, {} failures.",
		source.metrics().hits(),
		source.metrics().refreshes(),
		source.metrics().failures()
	);

	match source.token(InstallationId::new(1)).await {
		Ok(_) => println!("The mock unexpectedly issued a token."),
		Err(e) => println!(
			"Token request rejected with status {:?} and body {:?}.",
			e.status(),
			e.as_http().and_then(|record| record.body_text())
		),
	}

	Ok(())
}

/// Attaches a fixed app JWT before delegating to the shared transport.
struct DemoSigner(Arc<ReqwestTransport>);
impl HttpTransport for DemoSigner {
	type Error = ReqwestError;

	fn round_trip(&self, mut request: HttpRequest) -> TransportFuture<'_, Self::Error> {
		request
			.headers_mut()
			.insert(AUTHORIZATION, HeaderValue::from_static("Bearer demo-app-jwt"));

		self.0.round_trip(request)
	}
}
