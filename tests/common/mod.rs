#![allow(dead_code)]

// std
use std::{
	fs,
	net::{IpAddr, Ipv4Addr, SocketAddr},
};
// crates.io
use reqwest::{Client, header::CONTENT_TYPE};
use serde_json::Value;
use tempfile::TempDir;
// self
use login_broker::{config::Config, obs::LogFormat, server::Server, url::Url};

pub const INDEX_HTML: &str = "<!doctype html><title>spa</title><div id=\"root\"></div>";
pub const APP_JS: &str = "console.log('spa');";

/// A login-broker instance on an ephemeral port, backed by a temporary static directory.
pub struct TestServer {
	pub addr: SocketAddr,
	pub client: Client,
	_static_dir: TempDir,
}
impl TestServer {
	pub async fn start(token_endpoint: &str) -> Self {
		let static_dir = tempfile::tempdir().expect("Failed to create static directory.");

		fs::write(static_dir.path().join("index.html"), INDEX_HTML)
			.expect("Failed to write index.html.");
		fs::write(static_dir.path().join("app.js"), APP_JS).expect("Failed to write app.js.");

		let config = Config {
			port: 0,
			host: "http://127.0.0.1".into(),
			bind: IpAddr::V4(Ipv4Addr::LOCALHOST),
			static_dir: static_dir.path().to_path_buf(),
			token_endpoint: Url::parse(token_endpoint).expect("Token endpoint should parse."),
			client_id: "interview".into(),
			timeout_secs: 5,
			log_format: LogFormat::Text,
		};
		let addr = Server::new(config)
			.expect("Server configuration should be valid.")
			.spawn(std::future::pending())
			.await
			.expect("Server should bind an ephemeral port.");

		Self { addr, client: Client::new(), _static_dir: static_dir }
	}

	pub fn url(&self, path: &str) -> String {
		format!("http://{}{path}", self.addr)
	}

	pub async fn post_json(&self, body: &str) -> (u16, Value) {
		let response = self
			.client
			.post(self.url("/login"))
			.header(CONTENT_TYPE, "application/json")
			.body(body.to_owned())
			.send()
			.await
			.expect("Login request should complete.");

		read_json(response).await
	}

	/// Posts `body` to `/login` with the given `Content-Type`, or none at all.
	pub async fn post_raw(&self, content_type: Option<&str>, body: &str) -> (u16, Value) {
		let mut request = self.client.post(self.url("/login")).body(body.to_owned());

		if let Some(content_type) = content_type {
			request = request.header(CONTENT_TYPE, content_type);
		}

		read_json(request.send().await.expect("Login request should complete.")).await
	}

	pub async fn post_form(&self, pairs: &[(&str, &str)]) -> (u16, Value) {
		let response = self
			.client
			.post(self.url("/login"))
			.form(pairs)
			.send()
			.await
			.expect("Login request should complete.");

		read_json(response).await
	}

	pub async fn get_text(&self, path: &str) -> (u16, String) {
		let response =
			self.client.get(self.url(path)).send().await.expect("GET request should complete.");
		let status = response.status().as_u16();

		(status, response.text().await.expect("Response body should be readable."))
	}
}

async fn read_json(response: reqwest::Response) -> (u16, Value) {
	let status = response.status().as_u16();
	let bytes = response.bytes().await.expect("Response body should be readable.");

	(status, serde_json::from_slice(&bytes).expect("Response body should be JSON."))
}
