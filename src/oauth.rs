//! Password-grant request construction and token-endpoint response interpretation.
//!
//! The response rules mirror the provider's own collapsing behavior: any truthy `error` field
//! means the credentials were rejected, and anything else is a success carrying `access_token`.
//! HTTP status codes are recorded for logging but do not decide the outcome.

pub use oauth2;

// crates.io
use oauth2::{
	HttpClientError, HttpRequest, HttpResponse,
	http::{
		Method,
		header::{ACCEPT, CONTENT_TYPE, HeaderValue},
	},
};
use serde_json::{Map, Value};
use url::form_urlencoded::Serializer;
// self
use crate::{
	_prelude::*,
	auth::{Credentials, TokenSecret},
	error::{ConfigError, TransportError},
	provider::{PASSWORD_GRANT, ProviderDescriptor},
};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Deserialize)]
struct AccessTokenBody {
	access_token: String,
}

/// Builds the form-encoded password-grant request for `credentials`.
pub fn password_grant_request(
	descriptor: &ProviderDescriptor,
	credentials: &Credentials,
) -> Result<HttpRequest> {
	let body = Serializer::new(String::new())
		.append_pair("username", credentials.username())
		.append_pair("password", credentials.expose_password())
		.append_pair("grant_type", PASSWORD_GRANT)
		.append_pair("client_id", descriptor.client_id.as_str())
		.finish();

	oauth2::http::Request::builder()
		.method(Method::POST)
		.uri(descriptor.token_endpoint.as_str())
		.header(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE))
		.header(ACCEPT, HeaderValue::from_static(JSON_CONTENT_TYPE))
		.body(body.into_bytes())
		.map_err(|e| ConfigError::from(e).into())
}

/// Interprets a token-endpoint response.
///
/// - Body that is not a JSON object: [`TransportError::MalformedResponse`].
/// - Truthy `error` field: [`Error::InvalidCredentials`].
/// - Otherwise the string `access_token`, or [`TransportError::MissingAccessToken`].
pub fn interpret_token_response(response: &HttpResponse) -> Result<TokenSecret> {
	let status = response.status().as_u16();
	let body: Map<String, Value> = serde_json::from_slice(response.body())
		.map_err(|source| TransportError::MalformedResponse { source, status })?;

	if let Some(code) = body.get("error").filter(|value| is_truthy(value)) {
		return Err(Error::InvalidCredentials { provider_error: describe_error_code(code) });
	}
	if !response.status().is_success() {
		tracing::warn!(status, "Token endpoint reported a non-success status without an error.");
	}

	let AccessTokenBody { access_token } = serde_path_to_error::deserialize(Value::Object(body))
		.map_err(|source| TransportError::MissingAccessToken { source, status })?;

	Ok(TokenSecret::new(access_token))
}

/// Converts a transport failure into a broker error.
pub fn map_client_error<E>(err: HttpClientError<E>) -> Error
where
	E: 'static + Send + Sync + StdError,
{
	match err {
		HttpClientError::Reqwest(inner) => TransportError::network(*inner).into(),
		HttpClientError::Http(inner) => ConfigError::from(inner).into(),
		HttpClientError::Io(inner) => TransportError::Io(inner).into(),
		HttpClientError::Other(message) => TransportError::Other { message }.into(),
		_ => TransportError::Other { message: "unknown transport failure".into() }.into(),
	}
}

fn is_truthy(value: &Value) -> bool {
	match value {
		Value::Null => false,
		Value::Bool(flag) => *flag,
		Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
		Value::String(text) => !text.is_empty(),
		Value::Array(_) | Value::Object(_) => true,
	}
}

fn describe_error_code(code: &Value) -> String {
	match code {
		Value::String(text) => text.clone(),
		other => other.to_string(),
	}
}
