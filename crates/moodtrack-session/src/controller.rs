//! Session/view state machine.

use moodtrack_core::{
    Draft, FailureReason, Field, Identity, Screen, SupportNotice, distress_detected,
    notice_after_entry,
};
use tracing::{debug, info};

use crate::{Command, Completion, Event, SessionEpoch, SessionError, SessionState};

/// Session controller with explicit legal transitions.
///
/// States: logged out on Login, logged out on Signup, logged in on Dashboard.
#[derive(Debug, Clone)]
pub struct SessionController {
    state: SessionState,
}

impl SessionController {
    /// Creates a controller logged out on the Login screen.
    pub fn new() -> Self {
        Self {
            state: SessionState::new(),
        }
    }

    /// Returns the current state snapshot.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Applies one event and returns the backend calls it requires.
    ///
    /// # Errors
    /// Returns [`SessionError`] when the event is illegal in the current state
    /// or its draft guard fails; the state is left unchanged.
    pub fn handle(&mut self, event: Event) -> Result<Vec<Command>, SessionError> {
        match event {
            Event::SwitchToSignup => self.switch_to(Screen::Signup).map(|()| Vec::new()),
            Event::SwitchToLogin => self.switch_to(Screen::Login).map(|()| Vec::new()),
            Event::FieldChanged { field, value } => {
                self.set_field(field, value).map(|()| Vec::new())
            }
            Event::Submit => self.submit(),
            Event::Refresh => self.refresh(),
            Event::Logout => self.logout().map(|()| Vec::new()),
            Event::Completed(completion) => Ok(self.apply(completion)),
        }
    }

    /// Switches between the logged-out screens, clearing draft and error.
    ///
    /// # Errors
    /// Returns [`SessionError::InvalidTransition`] while logged in or when
    /// `screen` is the dashboard.
    pub fn switch_to(&mut self, screen: Screen) -> Result<(), SessionError> {
        let action = match screen {
            Screen::Login => "switch to login",
            Screen::Signup => "switch to signup",
            Screen::Dashboard => "switch to dashboard",
        };
        if self.state.identity.is_some() || screen == Screen::Dashboard {
            return Err(self.invalid(action));
        }

        self.enter(screen);
        Ok(())
    }

    /// Upserts one field of the active draft.
    ///
    /// # Errors
    /// Returns [`SessionError::Draft`] when `field` is not on the active form.
    pub fn set_field(
        &mut self,
        field: Field,
        value: impl Into<String>,
    ) -> Result<(), SessionError> {
        self.state.draft.set(field, value)?;
        Ok(())
    }

    /// Submits the active form.
    ///
    /// # Errors
    /// Returns [`SessionError::Draft`] when the form's guard fails.
    pub fn submit(&mut self) -> Result<Vec<Command>, SessionError> {
        let command = match (&self.state.draft, &self.state.identity) {
            (Draft::Login(draft), None) => Command::Login {
                epoch: self.state.epoch,
                credentials: draft.credentials()?,
            },
            (Draft::Signup(draft), None) => Command::Signup(draft.registration()?),
            (Draft::Entry(draft), Some(identity)) => Command::AddEntry {
                epoch: self.state.epoch,
                email: identity.email().to_string(),
                entry: draft.new_entry()?,
            },
            _ => return Err(self.invalid("submit")),
        };

        self.state.error = None;
        self.state.notice = None;
        debug!(screen = %self.state.screen, "form submitted");
        Ok(vec![command])
    }

    /// Re-issues both dashboard refreshes for the current identity.
    ///
    /// # Errors
    /// Returns [`SessionError::InvalidTransition`] while logged out.
    pub fn refresh(&mut self) -> Result<Vec<Command>, SessionError> {
        match self.state.identity.as_ref() {
            Some(identity) => Ok(refresh_commands(self.state.epoch, identity)),
            None => Err(self.invalid("refresh")),
        }
    }

    /// Ends the session and returns to the Login screen.
    ///
    /// Advancing the epoch invalidates every command still in flight.
    ///
    /// # Errors
    /// Returns [`SessionError::InvalidTransition`] while logged out.
    pub fn logout(&mut self) -> Result<(), SessionError> {
        if self.state.identity.is_none() {
            return Err(self.invalid("log out"));
        }

        self.state.epoch = self.state.epoch.next();
        self.state.identity = None;
        self.state.entries.clear();
        self.state.streak = None;
        self.enter(Screen::Login);
        info!(epoch = %self.state.epoch, "session ended");
        Ok(())
    }

    /// Applies a command outcome and returns any follow-up commands.
    pub fn apply(&mut self, completion: Completion) -> Vec<Command> {
        match completion {
            Completion::SignedUp(result) => {
                self.on_signed_up(result);
                Vec::new()
            }
            Completion::LoggedIn { epoch, result } => self.on_logged_in(epoch, result),
            Completion::EntryAdded {
                epoch,
                happiness,
                result,
            } => {
                let current = self.state.epoch;
                let Some(identity) = self.state.identity.as_ref().filter(|_| epoch == current)
                else {
                    debug!(%epoch, %current, "discarding stale entry result");
                    return Vec::new();
                };
                match result {
                    Ok(()) => {
                        let commands = refresh_commands(epoch, identity);
                        self.state.draft = Draft::empty_for(Screen::Dashboard);
                        self.state.error = None;
                        self.state.notice = notice_after_entry(happiness);
                        commands
                    }
                    Err(reason) => {
                        self.fail(reason);
                        Vec::new()
                    }
                }
            }
            Completion::EntriesLoaded {
                epoch,
                email,
                result,
            } => {
                if !self.is_current(epoch, &email) {
                    debug!(%epoch, "discarding stale entries refresh");
                    return Vec::new();
                }
                match result {
                    Ok(entries) => {
                        if distress_detected(&entries) {
                            self.state.notice = Some(SupportNotice::ReachOut);
                        }
                        self.state.entries = entries;
                    }
                    Err(reason) => {
                        debug!(%reason, "entries refresh failed; keeping previous list");
                    }
                }
                Vec::new()
            }
            Completion::StreakLoaded {
                epoch,
                email,
                result,
            } => {
                if !self.is_current(epoch, &email) {
                    debug!(%epoch, "discarding stale streak refresh");
                    return Vec::new();
                }
                match result {
                    Ok(streak) => self.state.streak = Some(streak),
                    Err(reason) => {
                        debug!(%reason, "streak refresh failed; keeping previous value");
                    }
                }
                Vec::new()
            }
        }
    }

    fn on_signed_up(&mut self, result: Result<(), FailureReason>) {
        match result {
            Ok(()) if self.state.identity.is_none() => {
                info!("signup accepted; returning to login");
                self.enter(Screen::Login);
            }
            Err(reason) if self.state.screen == Screen::Signup => self.fail(reason),
            _ => debug!("discarding signup result for a screen that moved on"),
        }
    }

    fn on_logged_in(
        &mut self,
        epoch: SessionEpoch,
        result: Result<Identity, FailureReason>,
    ) -> Vec<Command> {
        if epoch != self.state.epoch {
            debug!(%epoch, current = %self.state.epoch, "discarding stale login result");
            return Vec::new();
        }

        match result {
            Ok(identity) => {
                self.state.epoch = self.state.epoch.next();
                info!(epoch = %self.state.epoch, "session started");
                let commands = refresh_commands(self.state.epoch, &identity);
                self.state.identity = Some(identity);
                self.state.entries.clear();
                self.state.streak = None;
                self.enter(Screen::Dashboard);
                commands
            }
            Err(reason)
                if self.state.identity.is_none() && self.state.screen == Screen::Login =>
            {
                self.fail(reason);
                Vec::new()
            }
            Err(_) => {
                debug!("discarding login failure for a screen that moved on");
                Vec::new()
            }
        }
    }

    fn enter(&mut self, screen: Screen) {
        self.state.screen = screen;
        self.state.draft = Draft::empty_for(screen);
        self.state.error = None;
        self.state.notice = None;
    }

    fn fail(&mut self, reason: FailureReason) {
        debug!(screen = %self.state.screen, %reason, "submission failed");
        self.state.error = Some(reason.into_string());
    }

    fn is_current(&self, epoch: SessionEpoch, email: &str) -> bool {
        epoch == self.state.epoch
            && self
                .state
                .identity
                .as_ref()
                .is_some_and(|identity| identity.email() == email)
    }

    fn invalid(&self, action: &'static str) -> SessionError {
        SessionError::InvalidTransition {
            action,
            screen: self.state.screen,
        }
    }
}

impl Default for SessionController {
    fn default() -> Self {
        Self::new()
    }
}

fn refresh_commands(epoch: SessionEpoch, identity: &Identity) -> Vec<Command> {
    vec![
        Command::LoadEntries {
            epoch,
            email: identity.email().to_string(),
        },
        Command::LoadStreak {
            epoch,
            email: identity.email().to_string(),
        },
    ]
}
