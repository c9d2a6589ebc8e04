//! Installation access tokens for GitHub Apps: issue them, cache them per installation, and attach
//! them to outgoing requests through any HTTP transport.
//!
//! The crate is layered leaf-first:
//!
//! - [`source::StaticTokenSource`] exchanges an installation identifier for a fresh
//!   [`auth::AccessToken`] by calling the token endpoint through an app-authenticated transport.
//! - [`source::ReuseTokenSource`] keeps the latest token per installation in a
//!   [`store::TokenCache`] and only refreshes once the cached token is about to expire.
//! - [`transport::InstallationTransport`] decorates any [`http::HttpTransport`] so every request
//!   carries the installation's token.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod error;
pub mod http;
pub mod obs;
pub mod source;
pub mod store;
pub mod transport;

mod _prelude {
	pub use std::{
		collections::{BTreeMap, HashMap},
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		hash::Hash,
		pin::Pin,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use ::http as http_types;
#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
