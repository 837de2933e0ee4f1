// crates.io
use tracing::{Instrument, Span, instrument::Instrumented};
// self
use crate::{_prelude::*, provider::PASSWORD_GRANT};

/// A span builder used by the exchange flow.
#[derive(Clone, Debug)]
pub struct ExchangeSpan {
	span: Span,
}
impl ExchangeSpan {
	/// Creates a new span tagged with the password grant and the token endpoint's host.
	pub fn new(token_endpoint: &Url) -> Self {
		Self {
			span: tracing::info_span!(
				"login_broker.exchange",
				grant = PASSWORD_GRANT,
				endpoint = token_endpoint.host_str().unwrap_or_default(),
			),
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> Instrumented<Fut>
	where
		Fut: Future,
	{
		fut.instrument(self.span.clone())
	}
}
