// self
use crate::obs::ExchangeOutcome;

/// Records an exchange outcome via the global metrics recorder (when enabled).
pub fn record_exchange_outcome(outcome: ExchangeOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("login_broker_exchange_total", "outcome" => outcome.as_str()).increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = outcome;
	}
}
