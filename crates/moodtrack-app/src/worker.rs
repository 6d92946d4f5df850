//! Gateway command execution off the event-loop thread.

use std::sync::mpsc::Sender;
use std::thread;

use moodtrack_gateway::Gateway;
use moodtrack_session::{Command, Completion};
use tracing::debug;

use crate::AppError;

/// Message drained by the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopEvent {
    /// One raw line typed by the user.
    Line(String),
    /// Stdin reached end of file.
    InputClosed,
    /// A gateway command finished.
    Completed(Completion),
}

/// Runs one controller command against the gateway and wraps its outcome.
pub fn execute_command(gateway: &Gateway, command: Command) -> Completion {
    match command {
        Command::Signup(registration) => Completion::SignedUp(gateway.signup(&registration)),
        Command::Login { epoch, credentials } => Completion::LoggedIn {
            epoch,
            result: gateway.login(&credentials),
        },
        Command::AddEntry {
            epoch,
            email,
            entry,
        } => Completion::EntryAdded {
            epoch,
            happiness: entry.happiness,
            result: gateway.add_entry(&email, &entry),
        },
        Command::LoadEntries { epoch, email } => {
            let result = gateway.list_entries(&email);
            Completion::EntriesLoaded {
                epoch,
                email,
                result,
            }
        }
        Command::LoadStreak { epoch, email } => {
            let result = gateway.get_streak(&email);
            Completion::StreakLoaded {
                epoch,
                email,
                result,
            }
        }
    }
}

/// Spawns one thread per command and posts each completion to the loop.
///
/// A hung request delays only its own completion.
#[derive(Debug, Clone)]
pub struct GatewayWorker {
    gateway: Gateway,
    events: Sender<LoopEvent>,
}

impl GatewayWorker {
    /// Creates a worker posting completions into `events`.
    pub fn new(gateway: Gateway, events: Sender<LoopEvent>) -> Self {
        Self { gateway, events }
    }

    /// Starts `command` on its own thread.
    ///
    /// # Errors
    /// Returns [`AppError::Spawn`] when the OS refuses a new thread.
    pub fn dispatch(&self, command: Command) -> Result<(), AppError> {
        let gateway = self.gateway.clone();
        let events = self.events.clone();
        let name = format!("moodtrack-{}", command_label(&command));

        thread::Builder::new()
            .name(name)
            .spawn(move || {
                let completion = execute_command(&gateway, command);
                if events.send(LoopEvent::Completed(completion)).is_err() {
                    debug!("event loop gone; dropping completion");
                }
            })
            .map(drop)
            .map_err(AppError::Spawn)
    }
}

fn command_label(command: &Command) -> &'static str {
    match command {
        Command::Signup(_) => "signup",
        Command::Login { .. } => "login",
        Command::AddEntry { .. } => "add-entry",
        Command::LoadEntries { .. } => "list-entries",
        Command::LoadStreak { .. } => "get-streak",
    }
}
