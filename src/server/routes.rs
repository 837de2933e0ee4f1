//! Request handlers.

// crates.io
use axum::{
	Form, Json,
	body::Bytes,
	extract::{FromRequest, Request, State},
	http::{StatusCode, header::CONTENT_TYPE},
};
use serde_json::{Map, Value};
// self
use crate::{
	_prelude::*,
	auth::{Credentials, TokenSecret},
	server::{ApiError, AppState},
};

/// Body of a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
	/// Bearer token issued by the provider.
	pub token: TokenSecret,
}

#[derive(Deserialize)]
struct LoginBody {
	#[serde(default)]
	username: String,
	#[serde(default)]
	password: String,
}
impl From<LoginBody> for Credentials {
	fn from(body: LoginBody) -> Self {
		Credentials::new(body.username, body.password)
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BodyKind {
	Form,
	Json,
	Other,
}
impl BodyKind {
	fn of(req: &Request) -> Self {
		let Some(value) = req.headers().get(CONTENT_TYPE).and_then(|value| value.to_str().ok())
		else {
			return Self::Other;
		};
		let essence = value.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();

		if essence == "application/x-www-form-urlencoded" {
			Self::Form
		} else if essence == "application/json" || essence.ends_with("+json") {
			Self::Json
		} else {
			Self::Other
		}
	}
}

/// Extracts credentials from a JSON or form-encoded body.
///
/// Fields are forwarded as leniently as possible: missing or `null` values become empty strings,
/// other JSON values their textual form, and bodies of any other content type carry no
/// credentials at all. Only a body that cannot be decoded in its declared type is rejected.
#[derive(Debug)]
pub struct LoginForm(pub Credentials);
impl<S> FromRequest<S> for LoginForm
where
	S: Send + Sync,
{
	type Rejection = ApiError;

	async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
		let credentials = match BodyKind::of(&req) {
			BodyKind::Form => Form::<LoginBody>::from_request(req, state)
				.await
				.map(|Form(body)| body.into())
				.map_err(|rejection| ApiError::Rejected {
					status: rejection.status(),
					message: rejection.body_text(),
				})?,
			BodyKind::Json => {
				let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
					ApiError::Rejected { status: rejection.status(), message: rejection.body_text() }
				})?;

				json_credentials(&bytes)?
			},
			BodyKind::Other => Credentials::new("", ""),
		};

		Ok(Self(credentials))
	}
}

fn json_credentials(bytes: &[u8]) -> Result<Credentials, ApiError> {
	if bytes.iter().all(u8::is_ascii_whitespace) {
		return Ok(Credentials::new("", ""));
	}

	let value: Value = serde_json::from_slice(bytes).map_err(|e| ApiError::Rejected {
		status: StatusCode::BAD_REQUEST,
		message: format!("Failed to parse the request body as JSON: {e}"),
	})?;
	let Value::Object(fields) = value else {
		return Ok(Credentials::new("", ""));
	};

	Ok(Credentials::new(field_text(&fields, "username"), field_text(&fields, "password")))
}

fn field_text(fields: &Map<String, Value>, name: &str) -> String {
	match fields.get(name) {
		None | Some(Value::Null) => String::new(),
		Some(Value::String(text)) => text.clone(),
		Some(other) => other.to_string(),
	}
}

/// `POST /login`: trades the posted credentials for a bearer token.
pub async fn login(
	State(state): State<AppState>,
	LoginForm(credentials): LoginForm,
) -> Result<Json<LoginResponse>, ApiError> {
	let token = state.broker.exchange(&credentials).await?;

	Ok(Json(LoginResponse { token }))
}
