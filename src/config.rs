//! Process configuration, read from flags with environment-variable fallbacks.

// std
use std::{
	net::{IpAddr, Ipv4Addr, SocketAddr},
	path::PathBuf,
};
// crates.io
use clap::Parser;
// self
use crate::{
	_prelude::*,
	obs::LogFormat,
	provider::{DEFAULT_CLIENT_ID, HEALTHFORGE_TOKEN_ENDPOINT, ProviderDescriptor, ProviderError},
};

/// Name of the SPA entry document inside the static directory.
pub const INDEX_DOCUMENT: &str = "index.html";

/// Runtime configuration for the login broker.
#[derive(Clone, Debug, Parser)]
#[command(name = "login-broker", version, about)]
pub struct Config {
	/// Port to listen on.
	#[arg(long, env = "PORT", default_value_t = 4444)]
	pub port: u16,
	/// Public host prefix used in the startup line.
	#[arg(long, env = "HOST", default_value = "http://localhost")]
	pub host: String,
	/// Interface address to bind.
	#[arg(long, env = "BIND_ADDR", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
	pub bind: IpAddr,
	/// Directory holding the single-page application.
	#[arg(long, env = "STATIC_DIR", default_value = "public")]
	pub static_dir: PathBuf,
	/// OAuth 2.0 token endpoint receiving the password grant.
	#[arg(long, env = "TOKEN_ENDPOINT", default_value = HEALTHFORGE_TOKEN_ENDPOINT)]
	pub token_endpoint: Url,
	/// OAuth 2.0 client identifier.
	#[arg(long, env = "CLIENT_ID", default_value = DEFAULT_CLIENT_ID)]
	pub client_id: String,
	/// Seconds before an outbound token request is abandoned. Must be at least 1.
	#[arg(
		long,
		env = "TOKEN_TIMEOUT_SECS",
		default_value_t = 30,
		value_parser = clap::value_parser!(u64).range(1..)
	)]
	pub timeout_secs: u64,
	/// Log output format.
	#[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
	pub log_format: LogFormat,
}
impl Config {
	/// Address the listener binds to.
	pub fn socket_addr(&self) -> SocketAddr {
		SocketAddr::new(self.bind, self.port)
	}

	/// Timeout applied to each outbound token request.
	pub fn timeout(&self) -> Duration {
		Duration::from_secs(self.timeout_secs)
	}

	/// Path of the SPA entry document.
	pub fn index_path(&self) -> PathBuf {
		self.static_dir.join(INDEX_DOCUMENT)
	}

	/// Builds the validated provider descriptor.
	pub fn descriptor(&self) -> Result<ProviderDescriptor, ProviderError> {
		ProviderDescriptor::new(self.token_endpoint.clone(), self.client_id.clone())
	}
}
