//! Identity-provider descriptor: where credentials are exchanged and which client they belong to.
//!
//! The descriptor is validated once at construction so the exchange flow can treat it as
//! immutable, trusted configuration. Token endpoints must use HTTPS; plain HTTP is accepted only
//! for loopback hosts so local mock providers keep working.

// crates.io
use oauth2::ClientId;
use url::Host;
// self
use crate::_prelude::*;

/// Token endpoint of the HealthForge interview realm.
pub const HEALTHFORGE_TOKEN_ENDPOINT: &str =
	"https://auth.healthforge.io/auth/realms/interview/protocol/openid-connect/token";
/// Client identifier registered with the HealthForge interview realm.
pub const DEFAULT_CLIENT_ID: &str = "interview";
/// Grant type sent with every exchange.
pub const PASSWORD_GRANT: &str = "password";

/// Errors raised while constructing or validating descriptors.
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum ProviderError {
	/// Built-in endpoint constant failed to parse.
	#[error("Token endpoint is not a valid URL: {0}.")]
	InvalidEndpoint(String),
	/// Endpoint must use HTTPS unless it points at a loopback host.
	#[error("The token endpoint must use HTTPS: {url}.")]
	InsecureEndpoint {
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// Client identifier must not be blank.
	#[error("Client identifier must not be empty.")]
	EmptyClientId,
}

/// Immutable provider descriptor consumed by the exchange flow.
#[derive(Clone, Debug)]
pub struct ProviderDescriptor {
	/// Token endpoint receiving the password grant.
	pub token_endpoint: Url,
	/// OAuth 2.0 client identifier sent in the form body.
	pub client_id: ClientId,
}
impl ProviderDescriptor {
	/// Validates and builds a descriptor.
	pub fn new(token_endpoint: Url, client_id: impl Into<String>) -> Result<Self, ProviderError> {
		let client_id = client_id.into();

		if client_id.trim().is_empty() {
			return Err(ProviderError::EmptyClientId);
		}

		validate_endpoint(&token_endpoint)?;

		Ok(Self { token_endpoint, client_id: ClientId::new(client_id) })
	}

	/// Descriptor for the HealthForge interview realm.
	pub fn healthforge() -> Result<Self, ProviderError> {
		let endpoint = Url::parse(HEALTHFORGE_TOKEN_ENDPOINT)
			.map_err(|e| ProviderError::InvalidEndpoint(e.to_string()))?;

		Self::new(endpoint, DEFAULT_CLIENT_ID)
	}
}

fn validate_endpoint(url: &Url) -> Result<(), ProviderError> {
	match url.scheme() {
		"https" => Ok(()),
		"http" if is_loopback(url) => Ok(()),
		_ => Err(ProviderError::InsecureEndpoint { url: url.to_string() }),
	}
}

fn is_loopback(url: &Url) -> bool {
	match url.host() {
		Some(Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
		Some(Host::Ipv4(ip)) => ip.is_loopback(),
		Some(Host::Ipv6(ip)) => ip.is_loopback(),
		None => false,
	}
}
