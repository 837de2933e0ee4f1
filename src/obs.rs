//! Observability helpers for the exchange flow and the process-wide subscriber.
//!
//! - Every exchange runs inside a `login_broker.exchange` span carrying the `grant` and the token
//!   `endpoint` host.
//! - Enable `metrics` to increment the `login_broker_exchange_total` counter for every
//!   attempt/success/rejection/transport failure, labeled by `outcome`.

mod counter;
mod span;
mod subscriber;

pub use counter::*;
pub use span::*;
pub use subscriber::*;

// self
use crate::_prelude::*;

/// Outcome labels recorded for each exchange.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExchangeOutcome {
	/// Entry to the exchange.
	Attempt,
	/// Provider issued a token.
	Success,
	/// Provider rejected the credentials.
	Rejected,
	/// The exchange could not be completed.
	TransportFailure,
}
impl ExchangeOutcome {
	/// Classifies a finished exchange.
	pub fn of<T>(result: &Result<T>) -> Self {
		match result {
			Ok(_) => Self::Success,
			Err(Error::InvalidCredentials { .. }) => Self::Rejected,
			Err(_) => Self::TransportFailure,
		}
	}

	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Attempt => "attempt",
			Self::Success => "success",
			Self::Rejected => "rejected",
			Self::TransportFailure => "transport_failure",
		}
	}
}
impl Display for ExchangeOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
