//! JSON bodies exchanged with the backend service.

use moodtrack_core::{Entry, Gender, Happiness};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// `POST /signup` body.
#[derive(Serialize)]
pub struct SignupRequest<'a> {
    /// Account email.
    pub email: &'a str,
    /// Account password.
    pub password: &'a str,
    /// Age in years.
    pub age: u32,
    /// Gender choice.
    pub gender: Gender,
    /// What helps the user calm down.
    pub coping_mechanisms: &'a str,
}

/// `POST /login` body.
#[derive(Serialize)]
pub struct LoginRequest<'a> {
    /// Account email.
    pub email: &'a str,
    /// Account password.
    pub password: &'a str,
}

/// `POST /entries` body.
#[derive(Serialize)]
pub struct AddEntryRequest<'a> {
    /// Owner email.
    pub email: &'a str,
    /// Best part of the day.
    pub highlight: &'a str,
    /// Worst part of the day.
    pub lowlight: &'a str,
    /// Happiness score.
    pub happiness: Happiness,
    /// Notable event.
    pub major_event: &'a str,
}

/// Successful `POST /login` body. Extra user fields are ignored.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    /// Authenticated user record.
    pub user: UserPayload,
}

/// User record inside [`LoginResponse`].
#[derive(Debug, Deserialize)]
pub struct UserPayload {
    /// Account email.
    pub email: String,
}

/// `GET /entries` body; a missing or null list means no entries.
#[derive(Debug, Deserialize)]
pub struct EntriesResponse {
    /// Stored entries in backend order, not yet validated.
    #[serde(default)]
    pub entries: Option<Vec<serde_json::Value>>,
}

impl EntriesResponse {
    /// Decodes each entry, skipping the ones that do not validate.
    pub fn into_entries(self) -> Vec<Entry> {
        self.entries
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .filter_map(|(index, raw)| match serde_json::from_value::<Entry>(raw) {
                Ok(entry) => Some(entry),
                Err(error) => {
                    warn!(index, %error, "skipping malformed entry");
                    None
                }
            })
            .collect()
    }
}

/// `GET /streak` body.
#[derive(Debug, Deserialize)]
pub struct StreakResponse {
    /// Consecutive days with an entry.
    pub streak: u32,
}

/// Error body returned with non-success statuses.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    /// Backend-provided reason.
    #[serde(default)]
    pub error: Option<String>,
}
