#![warn(missing_docs)]
//! # moodtrack-ui
//!
//! ## Purpose
//! Projects session state into a display-ready [`View`] for the terminal shell.
//!
//! ## Responsibilities
//! - Pick the heading and form fields for the active screen.
//! - Mask password values and format entry timestamps for display.
//! - Render the view as plain text.
//!
//! ## Data flow
//! [`SessionState`] -> [`View::project`] -> [`View::render`] -> stdout.
//!
//! ## Ownership and lifetimes
//! `View` owns every string it shows so the shell can keep it after the
//! controller moves on.
//!
//! ## Error model
//! Projection is total; there is nothing to fail.
//!
//! ## Security and privacy notes
//! Password values never reach the view unmasked.

use std::fmt::Write as _;

use moodtrack_core::{Entry, Field, Screen};
use moodtrack_session::SessionState;

/// Shown in place of the entry list when it is empty.
pub const NO_ENTRIES_TEXT: &str = "No entries yet.";

/// Shown in place of the streak while it is unknown.
pub const UNKNOWN_STREAK_TEXT: &str = "-";

/// One form field with its displayed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLine {
    /// Field being shown.
    pub field: Field,
    /// Value as displayed (masked for passwords).
    pub value: String,
}

/// One entry card on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryCard {
    /// Display-formatted timestamp.
    pub timestamp: String,
    /// Highlight text.
    pub highlight: String,
    /// Lowlight text.
    pub lowlight: String,
    /// Happiness score.
    pub happiness: u8,
    /// Major event text; may be empty.
    pub major_event: String,
}

impl From<&Entry> for EntryCard {
    fn from(entry: &Entry) -> Self {
        Self {
            timestamp: entry.timestamp.display(),
            highlight: entry.highlight.clone(),
            lowlight: entry.lowlight.clone(),
            happiness: entry.happiness.value(),
            major_event: entry.major_event.clone(),
        }
    }
}

/// Renderable projection of one controller state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    /// App version string sourced from root `VERSION`.
    pub version: String,
    /// Active screen.
    pub screen: Screen,
    /// Screen heading.
    pub heading: &'static str,
    /// Welcome line; dashboard only.
    pub welcome: Option<String>,
    /// Streak line; dashboard only.
    pub streak: Option<String>,
    /// Active form fields.
    pub fields: Vec<FieldLine>,
    /// Entry cards in backend order; dashboard only.
    pub entries: Vec<EntryCard>,
    /// Wellbeing notice text.
    pub notice: Option<&'static str>,
    /// Current error message.
    pub error: Option<String>,
}

impl View {
    /// Projects `state` into a view.
    pub fn project(state: &SessionState, version: impl Into<String>) -> Self {
        let screen = state.screen();
        let draft = state.draft();
        let fields = draft
            .fields()
            .iter()
            .map(|&field| FieldLine {
                field,
                value: display_value(field, draft.get(field).unwrap_or_default()),
            })
            .collect();

        let (welcome, streak) = match state.identity() {
            Some(identity) if screen == Screen::Dashboard => (
                Some(format!("Welcome, {}", identity.email())),
                Some(streak_label(state.streak())),
            ),
            _ => (None, None),
        };

        Self {
            version: version.into(),
            screen,
            heading: heading(screen),
            welcome,
            streak,
            fields,
            entries: state.entries().iter().map(EntryCard::from).collect(),
            notice: state.notice().map(|notice| notice.message()),
            error: state.error().map(str::to_string),
        }
    }

    /// Renders the view as terminal text.
    pub fn render(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = writeln!(out, "moodtrack {} | {}", self.version, self.screen);
        let _ = writeln!(out, "== {} ==", self.heading);

        if let Some(welcome) = &self.welcome {
            let _ = writeln!(out, "{welcome}");
        }
        if let Some(streak) = &self.streak {
            let _ = writeln!(out, "Streak: {streak}");
        }

        if self.screen == Screen::Dashboard {
            let _ = writeln!(out, "-- New entry --");
        }
        for line in &self.fields {
            let _ = writeln!(out, "  {}: {}", line.field, line.value);
        }

        if self.screen == Screen::Dashboard {
            let _ = writeln!(out, "-- Entries --");
            if self.entries.is_empty() {
                let _ = writeln!(out, "{NO_ENTRIES_TEXT}");
            }
            for card in &self.entries {
                let _ = writeln!(out, "[{}] happiness {}/10", card.timestamp, card.happiness);
                let _ = writeln!(out, "  highlight: {}", card.highlight);
                let _ = writeln!(out, "  lowlight: {}", card.lowlight);
                if !card.major_event.is_empty() {
                    let _ = writeln!(out, "  major event: {}", card.major_event);
                }
            }
        }

        if let Some(notice) = self.notice {
            let _ = writeln!(out, "* {notice}");
        }
        if let Some(error) = &self.error {
            let _ = writeln!(out, "! {error}");
        }
        out
    }
}

/// Formats the streak line value: `N days`, or `-` while unknown.
pub fn streak_label(streak: Option<u32>) -> String {
    match streak {
        Some(days) => format!("{days} days"),
        None => UNKNOWN_STREAK_TEXT.to_string(),
    }
}

fn heading(screen: Screen) -> &'static str {
    match screen {
        Screen::Login => "Log in",
        Screen::Signup => "Sign up",
        Screen::Dashboard => "Dashboard",
    }
}

fn display_value(field: Field, raw: &str) -> String {
    match field {
        Field::Password => "*".repeat(raw.chars().count()),
        _ => raw.to_string(),
    }
}
