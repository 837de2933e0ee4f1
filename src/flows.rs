//! Credential-exchange orchestration.

mod password;

// self
use crate::{
	_prelude::*,
	http::{ReqwestHttpClient, TokenHttpClient},
	provider::ProviderDescriptor,
};

/// Exchanges resource-owner credentials for bearer tokens against a single provider.
///
/// The broker only holds immutable configuration and a shareable transport, so one instance
/// serves any number of concurrent logins without coordination. Nothing is cached between calls.
pub struct Broker<C = ReqwestHttpClient>
where
	C: ?Sized + TokenHttpClient,
{
	/// HTTP client wrapper used for every outbound provider request.
	pub http_client: Arc<C>,
	/// Provider descriptor naming the token endpoint and client identifier.
	pub descriptor: ProviderDescriptor,
}
impl<C> Broker<C>
where
	C: ?Sized + TokenHttpClient,
{
	/// Creates a broker that reuses the caller-provided transport.
	pub fn with_http_client(descriptor: ProviderDescriptor, http_client: impl Into<Arc<C>>) -> Self {
		Self { http_client: http_client.into(), descriptor }
	}
}
impl Broker<ReqwestHttpClient> {
	/// Creates a broker with its own reqwest transport whose requests fail after `timeout`.
	pub fn new(descriptor: ProviderDescriptor, timeout: Duration) -> Result<Self> {
		let http_client = ReqwestHttpClient::with_timeout(timeout)?;

		Ok(Self::with_http_client(descriptor, http_client))
	}
}
impl<C> Clone for Broker<C>
where
	C: ?Sized + TokenHttpClient,
{
	fn clone(&self) -> Self {
		Self { http_client: self.http_client.clone(), descriptor: self.descriptor.clone() }
	}
}
impl<C> Debug for Broker<C>
where
	C: ?Sized + TokenHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Broker")
			.field("token_endpoint", &self.descriptor.token_endpoint.as_str())
			.field("client_id", &self.descriptor.client_id.as_str())
			.finish()
	}
}
