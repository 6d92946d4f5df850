#![warn(missing_docs)]
//! # moodtrack-core
//!
//! ## Purpose
//! Defines the pure data model shared across the `moodtrack` workspace.
//!
//! ## Responsibilities
//! - Represent the authenticated identity, the active screen, and mood entries.
//! - Hold per-screen form drafts and evaluate their submission guards.
//! - Carry normalized backend failure reasons as opaque strings.
//! - Derive wellbeing notices from submitted and fetched entries.
//!
//! ## Data flow
//! The session controller edits [`Draft`] values, turns them into
//! [`Credentials`], [`Registration`] or [`NewEntry`] on submit, and receives
//! [`Identity`], [`Entry`] lists and streak counts back from the gateway.
//!
//! ## Ownership and lifetimes
//! Every value owns its strings. Entries are immutable once decoded and are
//! replaced as a whole list, never patched.
//!
//! ## Error model
//! Construction-time validation returns [`CoreError`]; draft guards return
//! [`DraftError`]. Backend failures are not errors of this crate: they travel
//! as [`FailureReason`] values.
//!
//! ## Security and privacy notes
//! `Debug` output of password-bearing types redacts the password.
//!
//! ## Example
//! ```rust
//! use moodtrack_core::{Draft, Field, Screen};
//!
//! let mut draft = Draft::empty_for(Screen::Login);
//! draft.set(Field::Email, "a@x.com").unwrap();
//! draft.set(Field::Password, "secret").unwrap();
//! assert_eq!(draft.get(Field::Email), Some("a@x.com"));
//! ```

use std::fmt;

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

mod draft;
mod wellbeing;

pub use draft::{
    Credentials, Draft, DraftError, EntryDraft, Field, Gender, LoginDraft, NewEntry, Registration,
    SignupDraft,
};
pub use wellbeing::{
    DISTRESS_WINDOW, LOW_HAPPINESS_THRESHOLD, SupportNotice, distress_detected, notice_after_entry,
};

/// Display format used for entry timestamps.
pub const TIMESTAMP_DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Top-level view currently shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Login form.
    Login,
    /// Registration form.
    Signup,
    /// Authenticated dashboard with entry form, streak, and history.
    Dashboard,
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Login => "login",
            Self::Signup => "signup",
            Self::Dashboard => "dashboard",
        };
        f.write_str(name)
    }
}

/// The authenticated user as held by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    email: String,
}

impl Identity {
    /// Creates an identity from the email returned by the backend.
    ///
    /// # Errors
    /// Returns [`CoreError::BlankEmail`] when the email is empty or whitespace.
    pub fn new(email: impl Into<String>) -> Result<Self, CoreError> {
        let email = email.into();
        if email.trim().is_empty() {
            return Err(CoreError::BlankEmail);
        }
        Ok(Self { email })
    }

    /// Returns the email identifier.
    pub fn email(&self) -> &str {
        &self.email
    }
}

/// Self-reported happiness score in `[1, 10]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub struct Happiness(u8);

impl Happiness {
    /// Lowest accepted score.
    pub const MIN: u8 = 1;
    /// Highest accepted score.
    pub const MAX: u8 = 10;

    /// Creates a validated score.
    ///
    /// # Errors
    /// Returns [`CoreError::HappinessOutOfRange`] outside `[1, 10]`.
    pub fn new(value: i64) -> Result<Self, CoreError> {
        match u8::try_from(value) {
            Ok(score) if (Self::MIN..=Self::MAX).contains(&score) => Ok(Self(score)),
            _ => Err(CoreError::HappinessOutOfRange(value)),
        }
    }

    /// Returns the raw score.
    pub fn value(self) -> u8 {
        self.0
    }
}

impl From<Happiness> for u8 {
    fn from(happiness: Happiness) -> Self {
        happiness.0
    }
}

impl fmt::Display for Happiness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Stored entries may carry the score as a JSON string ("7") because older
// clients posted raw form values.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawHappiness {
    Number(i64),
    Text(String),
}

impl<'de> Deserialize<'de> for Happiness {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = match RawHappiness::deserialize(deserializer)? {
            RawHappiness::Number(value) => value,
            RawHappiness::Text(text) => text.trim().parse::<i64>().map_err(|_| {
                serde::de::Error::custom(format!("happiness is not a number: {text:?}"))
            })?,
        };
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

/// Entry timestamp exactly as the backend reported it.
///
/// The raw text is kept so entries round-trip unchanged; parsing only happens
/// for display and ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(String);

impl Timestamp {
    /// Wraps a raw timestamp string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the raw timestamp text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses ISO-8601 local time (`2024-05-01T08:30:00.123456`) or RFC 3339.
    pub fn parsed(&self) -> Option<NaiveDateTime> {
        let raw = self.0.trim();
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .or_else(|| {
                DateTime::parse_from_rfc3339(raw)
                    .ok()
                    .map(|parsed| parsed.naive_local())
            })
    }

    /// Formats the timestamp for display, falling back to the raw text.
    pub fn display(&self) -> String {
        match self.parsed() {
            Some(parsed) => parsed.format(TIMESTAMP_DISPLAY_FORMAT).to_string(),
            None => self.0.clone(),
        }
    }

    /// Chronological ordering key; unparseable timestamps sort first.
    pub fn sort_key(&self) -> (Option<NaiveDateTime>, &str) {
        (self.parsed(), self.0.as_str())
    }
}

/// One recorded mood entry as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Server-assigned creation time.
    pub timestamp: Timestamp,
    /// Best part of the day.
    pub highlight: String,
    /// Worst part of the day.
    pub lowlight: String,
    /// Happiness score.
    pub happiness: Happiness,
    /// Notable event of the day.
    pub major_event: String,
}

/// Normalized reason for a failed backend operation.
///
/// Reasons are opaque text: either the backend's own message or an
/// operation-specific default.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct FailureReason(String);

impl FailureReason {
    /// Wraps a reason string.
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }

    /// Returns the reason text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the reason and returns its text.
    pub fn into_string(self) -> String {
        self.0
    }
}

/// Error type for core model validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Identity email was empty.
    #[error("email must not be blank")]
    BlankEmail,
    /// Happiness score outside the accepted range.
    #[error("happiness must be between 1 and 10, got {0}")]
    HappinessOutOfRange(i64),
}

#[cfg(test)]
mod tests {
    //! Unit tests for model validation and entry decoding.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0, false)]
    #[case(1, true)]
    #[case(10, true)]
    #[case(11, false)]
    #[case(-3, false)]
    fn happiness_enforces_range(#[case] value: i64, #[case] accepted: bool) {
        assert_eq!(Happiness::new(value).is_ok(), accepted);
    }

    #[test]
    fn identity_rejects_blank_email() {
        assert_eq!(Identity::new("  "), Err(CoreError::BlankEmail));
        assert_eq!(Identity::new("a@x.com").unwrap().email(), "a@x.com");
    }

    #[test]
    fn entry_accepts_string_encoded_happiness() {
        let raw = r#"{
            "timestamp":"2024-05-01T08:30:00.123456",
            "highlight":"walk",
            "lowlight":"rain",
            "happiness":"7",
            "major_event":"none"
        }"#;
        let entry: Entry = serde_json::from_str(raw).expect("entry should decode");
        assert_eq!(entry.happiness.value(), 7);
    }

    #[test]
    fn entry_rejects_out_of_range_happiness() {
        let raw = concat!(
            r#"{"timestamp":"t","highlight":"a","lowlight":"b","#,
            r#""happiness":12,"major_event":"c"}"#,
        );
        assert!(serde_json::from_str::<Entry>(raw).is_err());
    }

    #[test]
    fn timestamp_keeps_raw_text_and_formats_for_display() {
        let timestamp = Timestamp::new("2024-05-01T08:30:00.120000");
        assert_eq!(timestamp.display(), "2024-05-01 08:30:00");
        assert_eq!(
            serde_json::to_string(&timestamp).unwrap(),
            "\"2024-05-01T08:30:00.120000\""
        );
    }

    #[test]
    fn timestamp_display_handles_offsets_and_garbage() {
        assert_eq!(
            Timestamp::new("2024-05-01T08:30:00+02:00").display(),
            "2024-05-01 08:30:00"
        );
        assert_eq!(Timestamp::new("yesterday").display(), "yesterday");
        assert_eq!(
            Timestamp::new("2024-05-01T08:30:00").display(),
            "2024-05-01 08:30:00"
        );
    }
}
