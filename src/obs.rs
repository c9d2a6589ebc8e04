//! Optional observability helpers for token acquisition and decorated requests.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `installation_token.flow` with the `flow` and
//!   `installation` fields, plus a `debug` event per recorded outcome.
//! - Enable `metrics` to increment the `installation_token_flow_total` counter for every
//!   attempt/cache hit/success/failure, labeled by `flow` + `outcome`.
//!
//! Token values never reach either sink.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Operations observed by the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenFlow {
	/// Token endpoint exchange performed by the issuer.
	Issue,
	/// Cache lookup (and refresh on miss) performed by the reuse source.
	Reuse,
	/// Request decorated and forwarded by the installation transport.
	RoundTrip,
}
impl TokenFlow {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			TokenFlow::Issue => "issue",
			TokenFlow::Reuse => "reuse",
			TokenFlow::RoundTrip => "round_trip",
		}
	}
}
impl Display for TokenFlow {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowOutcome {
	/// Entry to an operation.
	Attempt,
	/// Cached token served without contacting the endpoint.
	CacheHit,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl FlowOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowOutcome::Attempt => "attempt",
			FlowOutcome::CacheHit => "cache_hit",
			FlowOutcome::Success => "success",
			FlowOutcome::Failure => "failure",
		}
	}
}
impl Display for FlowOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
