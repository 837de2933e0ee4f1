//! Resource-owner credentials forwarded to the token endpoint.

// crates.io
use oauth2::{ResourceOwnerPassword, ResourceOwnerUsername};
// self
use crate::_prelude::*;

/// Username/password pair that lives for the duration of a single login request.
///
/// Values are forwarded verbatim, including empty strings; the provider decides validity.
/// Neither field is ever rendered by the `Debug` implementation.
pub struct Credentials {
	username: ResourceOwnerUsername,
	password: ResourceOwnerPassword,
}
impl Credentials {
	/// Wraps a username/password pair.
	pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
		Self {
			username: ResourceOwnerUsername::new(username.into()),
			password: ResourceOwnerPassword::new(password.into()),
		}
	}

	/// Returns the username.
	pub fn username(&self) -> &str {
		self.username.as_str()
	}

	/// Returns the raw password. Callers must avoid logging this string.
	pub fn expose_password(&self) -> &str {
		self.password.secret()
	}
}
impl Debug for Credentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Credentials")
			.field("username", &"<redacted>")
			.field("password", &"<redacted>")
			.finish()
	}
}
