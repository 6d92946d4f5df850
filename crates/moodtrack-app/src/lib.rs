#![warn(missing_docs)]
//! # moodtrack-app
//!
//! ## Purpose
//! Wires configuration, logging, the remote gateway, the session controller,
//! and the text view into the `moodtrack` terminal client.
//!
//! ## Responsibilities
//! - Parse configuration from flags and environment ([`AppConfig`]).
//! - Initialise `tracing` output on stderr.
//! - Run gateway commands on worker threads and post their completions back
//!   to the event loop ([`GatewayWorker`]).
//! - Parse shell input lines into controller events ([`parse_input`]).
//! - Drive the single-writer event loop ([`Shell`]).
//!
//! ## Data flow
//! stdin thread -> [`LoopEvent::Line`] -> [`Shell`] -> controller ->
//! commands -> [`GatewayWorker`] -> [`LoopEvent::Completed`] -> [`Shell`] ->
//! rendered view on stdout.
//!
//! ## Ownership and lifetimes
//! The shell owns the controller. Worker threads own a cloned gateway and a
//! cloned sender; they never touch controller state.
//!
//! ## Error model
//! Startup and terminal I/O failures are [`AppError`]. Rejected shell input is
//! [`InputError`] and is reported inline without stopping the loop.
//!
//! ## Security and privacy notes
//! - Raw input lines pass through [`redact_sensitive`] before being logged.
//! - Logs go to stderr and never include passwords.

mod config;
mod logging;
mod shell;
mod worker;

pub use config::{AppConfig, DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};
pub use logging::init_tracing;
pub use shell::{Flow, HELP_TEXT, Input, InputError, Shell, parse_input};
pub use worker::{GatewayWorker, LoopEvent, execute_command};

use moodtrack_gateway::{GatewayConfigError, TransportError};
use thiserror::Error;

/// Build-time application version loaded from root `VERSION` file.
pub const APP_VERSION: &str = env!("MOODTRACK_VERSION");

/// Returns the app version sourced from root `VERSION`.
pub fn app_version() -> &'static str {
    APP_VERSION
}

/// Redacts secret values from a line before it is logged.
///
/// Everything after a secret marker is replaced, so both `password=abc` and
/// the shell form `set password abc` lose their value.
pub fn redact_sensitive(input: &str) -> String {
    let lower = input.to_ascii_lowercase();
    let cut = ["password", "passwd", "secret"]
        .iter()
        .filter_map(|key| lower.find(key).map(|position| position + key.len()))
        .min();

    match cut {
        Some(end) => format!("{} <redacted>", input[..end].trim_end()),
        None => input.to_string(),
    }
}

/// App integration error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Backend URL was rejected.
    #[error("configuration error: {0}")]
    Config(#[from] GatewayConfigError),
    /// HTTP client could not be built.
    #[error("transport setup error: {0}")]
    Transport(#[from] TransportError),
    /// Log filter directive did not parse.
    #[error("invalid log filter {filter:?}: {reason}")]
    LogFilter {
        /// Directive as given.
        filter: String,
        /// Parser message.
        reason: String,
    },
    /// A global subscriber was already installed.
    #[error("logging already initialised: {0}")]
    Logging(String),
    /// Worker thread could not be started.
    #[error("failed to spawn worker thread: {0}")]
    Spawn(std::io::Error),
    /// Terminal read or write failed.
    #[error("terminal i/o error: {0}")]
    Io(#[from] std::io::Error),
}
