//! Logger bootstrap for the coverage binary.
//!
//! Diagnostics go to stderr so the console report on stdout stays clean.
//! The level comes from `RUST_LOG` and falls back to the given default.

use crate::errors::{CoverageError, Result};
use flexi_logger::{Logger, LoggerHandle};
use log::info;

/// Starts the logger. Keep the returned handle alive for the whole run.
pub fn init_logging(default_level: &str) -> Result<LoggerHandle> {
	let handle = Logger::try_with_env_or_str(default_level)
		.map_err(|err| CoverageError::Logging(format!("invalid log level `{default_level}`: {err}")))?
		.log_to_stderr()
		.format(flexi_logger::default_format)
		.start()
		.map_err(|err| CoverageError::Logging(err.to_string()))?;
	info!(
		"event=app_start version={} platform={}",
		env!("CARGO_PKG_VERSION"),
		std::env::consts::OS
	);
	Ok(handle)
}
