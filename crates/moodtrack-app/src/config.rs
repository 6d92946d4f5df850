//! Command-line and environment configuration.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use moodtrack_gateway::{Gateway, HttpTransport};

use crate::{APP_VERSION, AppError};

/// Backend used when neither flag nor environment names one.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Per-request timeout used when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Terminal client for the moodtrack journaling backend.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "moodtrack", version = APP_VERSION)]
pub struct AppConfig {
    /// Base URL of the backend API
    #[arg(long, env = "MOODTRACK_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Per-request timeout in seconds
    #[arg(
        long,
        env = "MOODTRACK_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_secs: u64,

    /// Log filter directive (trace, debug, info, warn, error, or target=level)
    #[arg(long, env = "MOODTRACK_LOG", default_value = "warn")]
    pub log_filter: String,
}

impl AppConfig {
    /// Request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Builds the HTTP-backed gateway described by this configuration.
    ///
    /// # Errors
    /// Returns [`AppError::Transport`] when the HTTP client cannot be built and
    /// [`AppError::Config`] when the base URL is rejected.
    pub fn build_gateway(&self) -> Result<Gateway, AppError> {
        let transport = HttpTransport::new(self.timeout())?;
        Ok(Gateway::new(&self.api_url, Arc::new(transport))?)
    }
}
