//! Broker-level error types shared by the exchange flow, the provider descriptor, and the server.

// self
use crate::{_prelude::*, provider::ProviderError};

/// Broker-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Message returned to callers when the exchange could not be completed.
pub const AUTHENTICATION_FAILED: &str = "Error authenticating user";
/// Message returned to callers when the provider rejected the credentials.
pub const INVALID_CREDENTIALS: &str = "Invalid Credentials";

/// Canonical broker error exposed by public APIs.
///
/// The `Display` output of every variant that can reach an HTTP caller is a fixed string, so
/// transport details and provider internals stay in the source chain (and in logs).
#[derive(Debug, ThisError)]
pub enum Error {
	/// The token endpoint could not be reached or answered with something unusable.
	#[error("Error authenticating user")]
	Transport(#[from] TransportError),
	/// Provider rejected the credentials.
	#[error("Invalid Credentials")]
	InvalidCredentials {
		/// OAuth `error` code reported by the provider; kept for logs only.
		provider_error: String,
	},
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
}
impl Error {
	/// Returns the fixed message that is safe to hand back to an HTTP caller.
	pub fn public_message(&self) -> &'static str {
		match self {
			Self::InvalidCredentials { .. } => INVALID_CREDENTIALS,
			Self::Transport(_) | Self::Config(_) => AUTHENTICATION_FAILED,
		}
	}
}

/// Configuration and validation failures raised by the broker.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// Provider descriptor failed validation.
	#[error(transparent)]
	Provider(#[from] ProviderError),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO, unusable response bodies).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the token endpoint.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Request exceeded the configured timeout.
	#[error("Request timed out while calling the token endpoint.")]
	Timeout {
		/// Transport-specific timeout error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the token endpoint.")]
	Io(#[from] std::io::Error),
	/// HTTP client failed without a structured error.
	#[error("HTTP client error occurred while calling the token endpoint: {message}.")]
	Other {
		/// Client-supplied message.
		message: String,
	},
	/// Token endpoint answered with a body that is not a JSON object.
	#[error("Token endpoint returned malformed JSON (status {status}).")]
	MalformedResponse {
		/// JSON parsing failure.
		#[source]
		source: serde_json::Error,
		/// HTTP status code of the response.
		status: u16,
	},
	/// Token endpoint reported no error but also carried no usable `access_token`.
	#[error("Token endpoint response has no string access_token (status {status}).")]
	MissingAccessToken {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code of the response.
		status: u16,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error, promoting reqwest timeouts to
	/// [`TransportError::Timeout`].
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		let source: BoxError = Box::new(src);

		if source.downcast_ref::<ReqwestError>().is_some_and(ReqwestError::is_timeout) {
			Self::Timeout { source }
		} else {
			Self::Network { source }
		}
	}
}
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
