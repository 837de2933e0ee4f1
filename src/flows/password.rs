//! Resource Owner Password Credentials exchange.
//!
//! One inbound login maps to exactly one outbound token request: no retries, no caching, and
//! no state shared with other logins.

// self
use crate::{
	_prelude::*,
	auth::{Credentials, TokenSecret},
	flows::Broker,
	http::TokenHttpClient,
	oauth,
	obs::{self, ExchangeOutcome, ExchangeSpan},
};

impl<C> Broker<C>
where
	C: ?Sized + TokenHttpClient,
{
	/// Exchanges `credentials` for a bearer token.
	///
	/// Fails with [`Error::Transport`] when the provider cannot be reached or answers with
	/// something unusable, and with [`Error::InvalidCredentials`] when it reports an `error`.
	pub async fn exchange(&self, credentials: &Credentials) -> Result<TokenSecret> {
		let span = ExchangeSpan::new(&self.descriptor.token_endpoint);

		obs::record_exchange_outcome(ExchangeOutcome::Attempt);

		let result = span
			.instrument(async move {
				let request = oauth::password_grant_request(&self.descriptor, credentials)?;
				let response =
					self.http_client.execute(request).await.map_err(oauth::map_client_error)?;

				oauth::interpret_token_response(&response)
			})
			.await;
		let outcome = ExchangeOutcome::of(&result);

		match &result {
			Ok(_) => tracing::debug!(%outcome, "Credential exchange succeeded."),
			Err(Error::InvalidCredentials { provider_error }) =>
				tracing::info!(
					%outcome,
					provider_error = provider_error.as_str(),
					"Provider rejected the credentials."
				),
			Err(e) => tracing::warn!(%outcome, error = ?e, "Credential exchange failed."),
		}

		obs::record_exchange_outcome(outcome);

		result
	}
}
