//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::AppError;

/// Installs the global subscriber: `fmt` output to stderr filtered by `filter`.
///
/// Stdout is reserved for the rendered screen.
///
/// # Errors
/// Returns [`AppError::LogFilter`] for an unparseable directive and
/// [`AppError::Logging`] when a subscriber is already installed.
pub fn init_tracing(filter: &str) -> Result<(), AppError> {
    let env_filter = EnvFilter::try_new(filter).map_err(|error| AppError::LogFilter {
        filter: filter.to_string(),
        reason: error.to_string(),
    })?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()
        .map_err(|error| AppError::Logging(error.to_string()))
}
