//! HTTP surface: `POST /login` plus the single-page application's static files.
//!
//! Every `GET` that does not name an existing file (including `GET /login`) answers with the
//! SPA entry document, so client-side routes survive a reload.

pub mod error;
pub mod routes;

pub use error::ApiError;

// std
use std::{io, net::SocketAddr, path::Path};
// crates.io
use axum::{Router, body::Body, http::Request, routing::post};
use tokio::net::TcpListener;
use tower_http::{
	services::{ServeDir, ServeFile},
	trace::TraceLayer,
};
use tracing::Span;
// self
use crate::{
	_prelude::*,
	config::{Config, INDEX_DOCUMENT},
	flows::Broker,
};

/// State shared by request handlers.
#[derive(Clone, Debug)]
pub struct AppState {
	/// Broker performing the credential exchange.
	pub broker: Arc<Broker>,
}
impl AppState {
	/// Wraps a broker for sharing across handlers.
	pub fn new(broker: Broker) -> Self {
		Self { broker: Arc::new(broker) }
	}
}

/// Builds the application router.
pub fn router(state: AppState, static_dir: &Path) -> Router {
	let spa = ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join(INDEX_DOCUMENT)));

	Router::new()
		.route("/login", post(routes::login).fallback_service(spa.clone()))
		.fallback_service(spa)
		.layer(TraceLayer::new_for_http().make_span_with(request_span))
		.with_state(state)
}

/// A configured login-broker server.
#[derive(Debug)]
pub struct Server {
	config: Config,
	state: AppState,
}
impl Server {
	/// Builds the broker described by `config`.
	pub fn new(config: Config) -> Result<Self> {
		let descriptor = config.descriptor().map_err(crate::error::ConfigError::from)?;
		let broker = Broker::new(descriptor, config.timeout())?;

		Ok(Self { config, state: AppState::new(broker) })
	}

	/// Builds the router serving this configuration.
	pub fn router(&self) -> Router {
		router(self.state.clone(), &self.config.static_dir)
	}

	/// Serves until `shutdown` resolves.
	pub async fn serve(
		self,
		shutdown: impl Future<Output = ()> + Send + 'static,
	) -> io::Result<()> {
		let listener = self.bind().await?;

		axum::serve(listener, self.router()).with_graceful_shutdown(shutdown).await
	}

	/// Serves in a background task until `shutdown` resolves, returning the bound address.
	pub async fn spawn(
		self,
		shutdown: impl Future<Output = ()> + Send + 'static,
	) -> io::Result<SocketAddr> {
		let listener = self.bind().await?;
		let local_addr = listener.local_addr()?;
		let router = self.router();

		tokio::spawn(async move {
			if let Err(e) = axum::serve(listener, router).with_graceful_shutdown(shutdown).await {
				tracing::error!(error = %e, "Server stopped unexpectedly.");
			}
		});

		Ok(local_addr)
	}

	async fn bind(&self) -> io::Result<TcpListener> {
		let listener = TcpListener::bind(self.config.socket_addr()).await?;
		let local_addr = listener.local_addr()?;

		tracing::info!(addr = %local_addr, "Live at {}:{}", self.config.host, local_addr.port());

		Ok(listener)
	}
}

fn request_span(request: &Request<Body>) -> Span {
	let forwarded_for = request
		.headers()
		.get("x-forwarded-for")
		.and_then(|value| value.to_str().ok())
		.unwrap_or("-");

	tracing::info_span!(
		"request",
		method = %request.method(),
		path = request.uri().path(),
		forwarded_for,
	)
}
