//! Inputs to and outputs from the controller.

use moodtrack_core::{
    Credentials, Entry, FailureReason, Field, Happiness, Identity, NewEntry, Registration,
};

use crate::SessionEpoch;

/// Something that happened, to be applied by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// User asked for the signup form.
    SwitchToSignup,
    /// User asked for the login form.
    SwitchToLogin,
    /// User edited one form field.
    FieldChanged {
        /// Edited field.
        field: Field,
        /// New raw value.
        value: String,
    },
    /// User submitted the active form.
    Submit,
    /// User asked to reload entries and streak.
    Refresh,
    /// User logged out.
    Logout,
    /// A previously emitted command finished.
    Completed(Completion),
}

/// Backend call the controller wants performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Register an account.
    Signup(Registration),
    /// Authenticate; the result only counts while `epoch` is current.
    Login {
        /// Epoch the submission belongs to.
        epoch: SessionEpoch,
        /// Validated credentials.
        credentials: Credentials,
    },
    /// Record an entry for the session identified by `epoch`.
    AddEntry {
        /// Epoch the submission belongs to.
        epoch: SessionEpoch,
        /// Owner email.
        email: String,
        /// Validated entry.
        entry: NewEntry,
    },
    /// Reload the entry list.
    LoadEntries {
        /// Epoch the refresh belongs to.
        epoch: SessionEpoch,
        /// Identity the refresh is scoped to.
        email: String,
    },
    /// Reload the streak.
    LoadStreak {
        /// Epoch the refresh belongs to.
        epoch: SessionEpoch,
        /// Identity the refresh is scoped to.
        email: String,
    },
}

/// Outcome of a [`Command`], fed back as [`Event::Completed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Result of [`Command::Signup`].
    SignedUp(Result<(), FailureReason>),
    /// Result of [`Command::Login`].
    LoggedIn {
        /// Epoch copied from the command.
        epoch: SessionEpoch,
        /// Backend outcome.
        result: Result<Identity, FailureReason>,
    },
    /// Result of [`Command::AddEntry`].
    EntryAdded {
        /// Epoch copied from the command.
        epoch: SessionEpoch,
        /// Score that was submitted.
        happiness: Happiness,
        /// Backend outcome.
        result: Result<(), FailureReason>,
    },
    /// Result of [`Command::LoadEntries`].
    EntriesLoaded {
        /// Epoch copied from the command.
        epoch: SessionEpoch,
        /// Email copied from the command.
        email: String,
        /// Backend outcome.
        result: Result<Vec<Entry>, FailureReason>,
    },
    /// Result of [`Command::LoadStreak`].
    StreakLoaded {
        /// Epoch copied from the command.
        epoch: SessionEpoch,
        /// Email copied from the command.
        email: String,
        /// Backend outcome.
        result: Result<u32, FailureReason>,
    },
}
