//! `login-broker` binary: parses configuration, installs logging, and serves until Ctrl-C.

// std
use std::process::ExitCode;
// crates.io
use clap::Parser;
// self
use login_broker::{config::Config, obs, server::Server};

#[tokio::main]
async fn main() -> ExitCode {
	let config = Config::parse();

	if let Err(e) = obs::init_subscriber(config.log_format) {
		eprintln!("Failed to install the tracing subscriber: {e}.");

		return ExitCode::FAILURE;
	}

	let server = match Server::new(config) {
		Ok(server) => server,
		Err(e) => {
			tracing::error!(error = %e, "Invalid configuration.");

			return ExitCode::FAILURE;
		},
	};

	match server.serve(shutdown_signal()).await {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => {
			tracing::error!(error = %e, "Server failed.");

			ExitCode::FAILURE
		},
	}
}

async fn shutdown_signal() {
	if let Err(e) = tokio::signal::ctrl_c().await {
		tracing::error!(error = %e, "Failed to listen for the shutdown signal.");

		std::future::pending::<()>().await;
	}

	tracing::info!("Shutting down.");
}
