#![warn(missing_docs)]
//! # moodtrack-gateway
//!
//! ## Purpose
//! Translates session intents into backend requests and normalizes every
//! outcome into `Ok(payload)` or `Err(FailureReason)`.
//!
//! ## Responsibilities
//! - Validate the configured backend base URL.
//! - Build the five backend requests (signup, login, add entry, list entries,
//!   streak) through an injectable [`BackendTransport`].
//! - Map non-success statuses, undecodable bodies, and transport failures to
//!   a [`FailureReason`].
//!
//! ## Data flow
//! Session command -> [`Gateway`] operation -> [`ApiRequest`] ->
//! [`BackendTransport::send`] -> [`ApiResponse`] -> decoded payload or reason.
//!
//! ## Ownership and lifetimes
//! The gateway holds only the base URL and a shared transport handle; it is
//! cheap to clone into worker threads and keeps no per-call state.
//!
//! ## Error model
//! Operations never return transport or decode errors directly. The backend's
//! own `error` message wins; otherwise an operation default is used, and a
//! missing response becomes [`UNREACHABLE_REASON`]. Nothing is retried.
//!
//! ## Security and privacy notes
//! Request bodies and emails are never logged. Plain `http` to a
//! non-loopback host is accepted but logged as a warning.
//!
//! ## Example
//! ```rust
//! use moodtrack_gateway::validate_base_url;
//!
//! assert!(validate_base_url("http://localhost:5000").is_ok());
//! assert!(validate_base_url("ftp://localhost").is_err());
//! ```

use std::fmt;
use std::sync::Arc;

use moodtrack_core::{Credentials, Entry, FailureReason, Identity, NewEntry, Registration};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};
use url::{Host, Url};

mod http;
mod transport;
pub mod wire;

pub use http::HttpTransport;
pub use transport::{ApiRequest, ApiResponse, BackendTransport, Method, TransportError};

use wire::{
    AddEntryRequest, EntriesResponse, ErrorBody, LoginRequest, LoginResponse, SignupRequest,
    StreakResponse,
};

/// Reason reported when no response was received.
pub const UNREACHABLE_REASON: &str = "Unable to reach the server";

/// Backend operation exposed by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// `POST /signup`.
    Signup,
    /// `POST /login`.
    Login,
    /// `POST /entries`.
    AddEntry,
    /// `GET /entries`.
    ListEntries,
    /// `GET /streak`.
    GetStreak,
}

impl Operation {
    /// Endpoint path relative to the base URL.
    pub const fn path(self) -> &'static str {
        match self {
            Self::Signup => "signup",
            Self::Login => "login",
            Self::AddEntry | Self::ListEntries => "entries",
            Self::GetStreak => "streak",
        }
    }

    /// HTTP method of the endpoint.
    pub const fn method(self) -> Method {
        match self {
            Self::Signup | Self::Login | Self::AddEntry => Method::Post,
            Self::ListEntries | Self::GetStreak => Method::Get,
        }
    }

    /// Reason used when the backend gives none.
    pub const fn default_reason(self) -> &'static str {
        match self {
            Self::Signup => "Signup failed",
            Self::Login => "Login failed",
            Self::AddEntry => "Failed to add entry",
            Self::ListEntries => "Failed to load entries",
            Self::GetStreak => "Failed to load streak",
        }
    }

    fn failure(self) -> FailureReason {
        FailureReason::new(self.default_reason())
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Signup => "signup",
            Self::Login => "login",
            Self::AddEntry => "add_entry",
            Self::ListEntries => "list_entries",
            Self::GetStreak => "get_streak",
        };
        f.write_str(name)
    }
}

/// Request/response wrapper around the backend service.
#[derive(Clone)]
pub struct Gateway {
    base_url: Url,
    transport: Arc<dyn BackendTransport>,
}

impl Gateway {
    /// Creates a gateway for `base_url`.
    ///
    /// # Errors
    /// Returns [`GatewayConfigError`] when the URL fails
    /// [`validate_base_url`].
    pub fn new(
        base_url: &str,
        transport: Arc<dyn BackendTransport>,
    ) -> Result<Self, GatewayConfigError> {
        let base_url = validate_base_url(base_url)?;
        if base_url.scheme() == "http" && !is_loopback(&base_url) {
            warn!(
                host = base_url.host_str().unwrap_or_default(),
                "backend uses plain http; credentials travel unencrypted"
            );
        }
        Ok(Self {
            base_url,
            transport,
        })
    }

    /// Returns the normalized base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Registers a new account.
    ///
    /// # Errors
    /// Returns the backend reason or `"Signup failed"`.
    pub fn signup(&self, registration: &Registration) -> Result<(), FailureReason> {
        let body = SignupRequest {
            email: &registration.email,
            password: &registration.password,
            age: registration.age,
            gender: registration.gender,
            coping_mechanisms: &registration.coping_mechanisms,
        };
        self.execute(Operation::Signup, None, Some(&body))?;
        Ok(())
    }

    /// Authenticates and returns the identity reported by the backend.
    ///
    /// # Errors
    /// Returns the backend reason or `"Login failed"`, including when the
    /// success body lacks a usable `user.email`.
    pub fn login(&self, credentials: &Credentials) -> Result<Identity, FailureReason> {
        let body = LoginRequest {
            email: &credentials.email,
            password: &credentials.password,
        };
        let response = self.execute(Operation::Login, None, Some(&body))?;
        let decoded: LoginResponse = decode(Operation::Login, &response)?;
        Identity::new(decoded.user.email).map_err(|error| {
            warn!(operation = %Operation::Login, %error, "backend returned unusable identity");
            Operation::Login.failure()
        })
    }

    /// Records one entry for `email`.
    ///
    /// # Errors
    /// Returns the backend reason or `"Failed to add entry"`.
    pub fn add_entry(&self, email: &str, entry: &NewEntry) -> Result<(), FailureReason> {
        let body = AddEntryRequest {
            email,
            highlight: &entry.highlight,
            lowlight: &entry.lowlight,
            happiness: entry.happiness,
            major_event: &entry.major_event,
        };
        self.execute(Operation::AddEntry, None, Some(&body))?;
        Ok(())
    }

    /// Fetches every entry for `email`, in backend order.
    ///
    /// # Errors
    /// Returns the backend reason or `"Failed to load entries"`.
    pub fn list_entries(&self, email: &str) -> Result<Vec<Entry>, FailureReason> {
        let response = self.execute::<()>(Operation::ListEntries, Some(email), None)?;
        let decoded: EntriesResponse = decode(Operation::ListEntries, &response)?;
        Ok(decoded.into_entries())
    }

    /// Fetches the current streak for `email`.
    ///
    /// # Errors
    /// Returns the backend reason or `"Failed to load streak"`.
    pub fn get_streak(&self, email: &str) -> Result<u32, FailureReason> {
        let response = self.execute::<()>(Operation::GetStreak, Some(email), None)?;
        let decoded: StreakResponse = decode(Operation::GetStreak, &response)?;
        Ok(decoded.streak)
    }

    /// Builds the absolute URL for `operation`, with `?email=` when given.
    ///
    /// # Errors
    /// Returns the operation default reason if the path cannot be joined.
    pub fn endpoint(
        &self,
        operation: Operation,
        email: Option<&str>,
    ) -> Result<Url, FailureReason> {
        let mut url = self.base_url.join(operation.path()).map_err(|error| {
            warn!(%operation, %error, "failed to build endpoint url");
            operation.failure()
        })?;
        if let Some(email) = email {
            url.query_pairs_mut().append_pair("email", email);
        }
        Ok(url)
    }

    fn execute<B: Serialize>(
        &self,
        operation: Operation,
        email_query: Option<&str>,
        body: Option<&B>,
    ) -> Result<ApiResponse, FailureReason> {
        let url = self.endpoint(operation, email_query)?;
        let body = body
            .map(serde_json::to_value)
            .transpose()
            .map_err(|error| {
                warn!(%operation, %error, "failed to encode request body");
                operation.failure()
            })?;

        let request = ApiRequest {
            method: operation.method(),
            url,
            body,
        };

        debug!(%operation, method = %request.method, "sending backend request");
        let response = self.transport.send(&request).map_err(|error| {
            warn!(%operation, %error, "backend unreachable");
            FailureReason::new(UNREACHABLE_REASON)
        })?;

        if !response.is_success() {
            let reason = rejection_reason(operation, &response.body);
            warn!(%operation, status = response.status, %reason, "backend rejected request");
            return Err(reason);
        }

        debug!(%operation, status = response.status, "backend request succeeded");
        Ok(response)
    }
}

impl fmt::Debug for Gateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gateway")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

/// Validates and normalizes the backend base URL.
///
/// The returned URL always ends with `/` so endpoint paths join beneath it.
///
/// # Errors
/// Returns [`GatewayConfigError`] for unparseable URLs, schemes other than
/// `http`/`https`, or URLs carrying a query or fragment.
pub fn validate_base_url(raw: &str) -> Result<Url, GatewayConfigError> {
    let mut url = Url::parse(raw.trim())
        .map_err(|error| GatewayConfigError::InvalidUrl(format!("{raw}: {error}")))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(GatewayConfigError::UnsupportedScheme(url.scheme().to_string()));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(GatewayConfigError::UnexpectedComponents);
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn is_loopback(url: &Url) -> bool {
    match url.host() {
        Some(Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
        Some(Host::Ipv4(address)) => address.is_loopback(),
        Some(Host::Ipv6(address)) => address.is_loopback(),
        None => false,
    }
}

fn rejection_reason(operation: Operation, body: &[u8]) -> FailureReason {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.error)
        .filter(|reason| !reason.trim().is_empty())
        .map(FailureReason::new)
        .unwrap_or_else(|| operation.failure())
}

fn decode<T: DeserializeOwned>(
    operation: Operation,
    response: &ApiResponse,
) -> Result<T, FailureReason> {
    serde_json::from_slice(&response.body).map_err(|error| {
        warn!(%operation, %error, "backend response did not match contract");
        operation.failure()
    })
}

/// Invalid gateway configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayConfigError {
    /// URL could not be parsed.
    #[error("invalid backend url: {0}")]
    InvalidUrl(String),
    /// Scheme is neither `http` nor `https`.
    #[error("backend url must use http or https, got {0}")]
    UnsupportedScheme(String),
    /// URL carries a query string or fragment.
    #[error("backend url must not contain a query or fragment")]
    UnexpectedComponents,
}
