#![warn(missing_docs)]
//! # moodtrack-session
//!
//! ## Purpose
//! Implements the session/view controller: the single owner of screen,
//! identity, draft, error, entries, and streak state.
//!
//! ## Responsibilities
//! - Apply user events (screen switches, field edits, submit, refresh,
//!   logout) as explicit state transitions.
//! - Emit [`Command`] values for every backend call instead of performing I/O.
//! - Apply [`Completion`] values, discarding results that belong to an older
//!   session epoch or identity.
//!
//! ## Data flow
//! Event loop -> [`SessionController::handle`] -> state mutation +
//! `Vec<Command>` -> app executes commands -> [`Event::Completed`] ->
//! [`SessionController::handle`].
//!
//! ## Ownership and lifetimes
//! The controller owns [`SessionState`] outright. Readers get `&SessionState`;
//! only the controller's transition methods mutate it.
//!
//! ## Error model
//! Events that are illegal in the current state, or whose draft guard fails,
//! return [`SessionError`] and leave the state untouched. Backend failures are
//! not errors here: they arrive inside completions and become the error
//! message (user submissions) or are swallowed (background refreshes).
//!
//! ## Security and privacy notes
//! Credentials exist only inside the draft and the emitted login command. Logs
//! carry epochs and screen names, never emails or passwords.
//!
//! ## Example
//! ```rust
//! use moodtrack_core::Screen;
//! use moodtrack_session::{Event, SessionController};
//!
//! let mut controller = SessionController::new();
//! controller.handle(Event::SwitchToSignup).unwrap();
//! assert_eq!(controller.state().screen(), Screen::Signup);
//! ```

mod controller;
mod event;
mod state;

pub use controller::SessionController;
pub use event::{Command, Completion, Event};
pub use state::{SessionEpoch, SessionState};

use moodtrack_core::{DraftError, Screen};
use thiserror::Error;

/// Rejected event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Draft edit or submission guard failed.
    #[error(transparent)]
    Draft(#[from] DraftError),
    /// Event has no transition from the current screen.
    #[error("cannot {action} from the {screen} screen")]
    InvalidTransition {
        /// Attempted action.
        action: &'static str,
        /// Screen that was active.
        screen: Screen,
    },
}
