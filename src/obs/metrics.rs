// self
use crate::obs::{FlowOutcome, TokenFlow};

/// Records an outcome via the global metrics recorder and a `debug` event (when enabled).
pub fn record_flow_outcome(flow: TokenFlow, outcome: FlowOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"installation_token_flow_total",
			"flow" => flow.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(flow = flow.as_str(), outcome = outcome.as_str(), "token flow outcome");
	}

	#[cfg(not(any(feature = "metrics", feature = "tracing")))]
	{
		let _ = (flow, outcome);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn record_flow_outcome_without_sinks() {
		record_flow_outcome(TokenFlow::Reuse, FlowOutcome::CacheHit);
		record_flow_outcome(TokenFlow::RoundTrip, FlowOutcome::Failure);
	}
}
