// crates.io
use clap::ValueEnum;
use tracing_subscriber::EnvFilter;
// self
use crate::_prelude::*;

/// Filter applied when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_LOG_FILTER: &str = "login_broker=info,tower_http=info,warn";

type BoxError = Box<dyn StdError + Send + Sync>;

/// Output format of the process-wide subscriber.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
	/// Human-readable lines.
	#[default]
	Text,
	/// One JSON object per event.
	Json,
}

/// Installs the global `tracing` subscriber, honoring `RUST_LOG`.
pub fn init_subscriber(format: LogFormat) -> Result<(), BoxError> {
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
	let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

	match format {
		LogFormat::Text => builder.try_init(),
		LogFormat::Json => builder.json().try_init(),
	}
}
