//! Mapping of broker failures onto HTTP responses.

// crates.io
use axum::{
	Json,
	http::StatusCode,
	response::{IntoResponse, Response},
};
// self
use crate::_prelude::*;

/// JSON body sent with every failed request.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
	/// Human-readable message.
	pub error: String,
}

/// Error returned by request handlers.
#[derive(Debug, ThisError)]
pub enum ApiError {
	/// Credential exchange failed; always answered with `500`.
	#[error(transparent)]
	Exchange(#[from] Error),
	/// Request body could not be decoded.
	#[error("{message}")]
	Rejected {
		/// Status chosen by the extractor that refused the body.
		status: StatusCode,
		/// Extractor message.
		message: String,
	},
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let (status, error) = match self {
			Self::Exchange(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.public_message().to_owned()),
			Self::Rejected { status, message } => (status, message),
		};

		(status, Json(ErrorBody { error })).into_response()
	}
}
