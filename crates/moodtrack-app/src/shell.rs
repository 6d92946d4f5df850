//! Line-oriented terminal shell and the single-writer event loop.

use std::io::Write;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use moodtrack_core::{DraftError, Field};
use moodtrack_session::{Command, Event, SessionController};
use moodtrack_ui::View;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    AppError, DEFAULT_TIMEOUT_SECS, GatewayWorker, LoopEvent, app_version, redact_sensitive,
};

/// Usage text printed by `help`.
pub const HELP_TEXT: &str = "\
commands:
  login                   show the login form
  signup                  show the signup form
  set <field> <value...>  edit a field of the active form
  submit                  submit the active form
  refresh                 reload entries and streak
  logout                  end the session
  help                    show this text
  quit                    exit now (end of input exits once pending calls finish)
fields:
  login:     email password
  signup:    email password age gender coping_mechanisms
  dashboard: highlight lowlight happiness major_event";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Line maps to a controller event.
    Event(Event),
    /// Print usage.
    Help,
    /// Leave the shell.
    Quit,
    /// Nothing typed.
    Blank,
}

/// Rejected input line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// First word is not a known command.
    #[error("unknown command {0:?}; type `help` for a list")]
    UnknownCommand(String),
    /// Command needs an argument that was not given.
    #[error("`{command}` needs a {argument}")]
    MissingArgument {
        /// Command typed.
        command: &'static str,
        /// Missing argument name.
        argument: &'static str,
    },
    /// Command takes no arguments but some were given.
    #[error("`{0}` takes no arguments")]
    UnexpectedArgument(&'static str),
    /// Field name did not parse.
    #[error(transparent)]
    Field(#[from] DraftError),
}

/// Parses one shell line.
///
/// Commands are case-insensitive. For `set`, everything after the field name
/// is the value, with surrounding whitespace trimmed; an absent value clears
/// the field.
///
/// # Errors
/// Returns [`InputError`] for unknown commands, unknown fields and argument
/// count mismatches.
pub fn parse_input(line: &str) -> Result<Input, InputError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let bare = |command: &'static str, input: Input| {
        if rest.is_empty() {
            Ok(input)
        } else {
            Err(InputError::UnexpectedArgument(command))
        }
    };

    match word.to_ascii_lowercase().as_str() {
        "" => Ok(Input::Blank),
        "login" => bare("login", Input::Event(Event::SwitchToLogin)),
        "signup" => bare("signup", Input::Event(Event::SwitchToSignup)),
        "submit" => bare("submit", Input::Event(Event::Submit)),
        "refresh" => bare("refresh", Input::Event(Event::Refresh)),
        "logout" => bare("logout", Input::Event(Event::Logout)),
        "help" | "?" => Ok(Input::Help),
        "quit" | "exit" => Ok(Input::Quit),
        "set" => {
            if rest.is_empty() {
                return Err(InputError::MissingArgument {
                    command: "set",
                    argument: "field name",
                });
            }
            let (name, value) = rest
                .split_once(char::is_whitespace)
                .map_or((rest, ""), |(name, value)| (name, value.trim()));
            let field: Field = name.parse()?;
            Ok(Input::Event(Event::FieldChanged {
                field,
                value: value.to_string(),
            }))
        }
        _ => Err(InputError::UnknownCommand(word.to_string())),
    }
}

/// Whether the event loop keeps running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep draining events.
    Continue,
    /// Stop the loop.
    Exit,
}

/// Event loop state: the controller, the worker, and the terminal output.
///
/// The shell is the only writer of controller state. It counts dispatched
/// commands so that end of input waits for their completions.
pub struct Shell<W: Write> {
    controller: SessionController,
    worker: GatewayWorker,
    out: W,
    version: String,
    in_flight: usize,
    closing: bool,
    drain_timeout: Duration,
}

impl<W: Write> Shell<W> {
    /// Creates a shell logged out on the Login screen.
    pub fn new(worker: GatewayWorker, out: W) -> Self {
        Self {
            controller: SessionController::new(),
            worker,
            out,
            version: format!("v{}", app_version()),
            in_flight: 0,
            closing: false,
            drain_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Sets how long end of input waits for outstanding completions.
    pub fn with_drain_timeout(mut self, drain_timeout: Duration) -> Self {
        self.drain_timeout = drain_timeout;
        self
    }

    /// Commands dispatched whose completions have not been applied yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Current controller.
    pub fn controller(&self) -> &SessionController {
        &self.controller
    }

    /// Terminal output written so far.
    pub fn output(&self) -> &W {
        &self.out
    }

    /// Writes the current view.
    ///
    /// # Errors
    /// Returns [`AppError::Io`] when the terminal write fails.
    pub fn render(&mut self) -> Result<(), AppError> {
        let view = View::project(self.controller.state(), self.version.as_str());
        writeln!(self.out, "{}", view.render())?;
        self.out.flush()?;
        Ok(())
    }

    /// Applies one loop event.
    ///
    /// # Errors
    /// Returns [`AppError`] when output fails or a worker cannot be spawned.
    pub fn on_event(&mut self, event: LoopEvent) -> Result<Flow, AppError> {
        match event {
            LoopEvent::Line(line) => self.on_line(&line),
            LoopEvent::InputClosed => {
                info!(in_flight = self.in_flight, "input closed");
                self.closing = true;
                Ok(self.flow_after_close())
            }
            LoopEvent::Completed(completion) => {
                self.in_flight = self.in_flight.saturating_sub(1);
                let commands = self.controller.apply(completion);
                self.dispatch(commands)?;
                self.render()?;
                Ok(self.flow_after_close())
            }
        }
    }

    /// Drains `events` until quit, until end of input once nothing is in
    /// flight, or until every sender is gone.
    ///
    /// After end of input, waiting for outstanding completions is bounded by
    /// the drain timeout.
    ///
    /// # Errors
    /// Returns the first [`AppError`] raised while handling an event.
    pub fn run(&mut self, events: &Receiver<LoopEvent>) -> Result<(), AppError> {
        self.render()?;
        writeln!(self.out, "type `help` for commands")?;
        let mut deadline: Option<Instant> = None;
        loop {
            let event = match deadline {
                None => match events.recv() {
                    Ok(event) => event,
                    Err(_) => break,
                },
                Some(deadline) => {
                    let remaining = deadline.saturating_duration_since(Instant::now());
                    match events.recv_timeout(remaining) {
                        Ok(event) => event,
                        Err(RecvTimeoutError::Timeout) => {
                            warn!(in_flight = self.in_flight, "gave up waiting for pending calls");
                            break;
                        }
                        Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
            };
            if self.on_event(event)? == Flow::Exit {
                break;
            }
            if self.closing && deadline.is_none() {
                deadline = Some(Instant::now() + self.drain_timeout);
            }
        }
        Ok(())
    }

    fn on_line(&mut self, line: &str) -> Result<Flow, AppError> {
        debug!(input = %redact_sensitive(line), "input received");
        let input = match parse_input(line) {
            Ok(input) => input,
            Err(error) => {
                writeln!(self.out, "? {error}")?;
                return Ok(Flow::Continue);
            }
        };

        match input {
            Input::Blank => {}
            Input::Quit => return Ok(Flow::Exit),
            Input::Help => writeln!(self.out, "{HELP_TEXT}")?,
            Input::Event(event) => match self.controller.handle(event) {
                Ok(commands) => {
                    self.dispatch(commands)?;
                    self.render()?;
                }
                Err(error) => writeln!(self.out, "? {error}")?,
            },
        }
        Ok(Flow::Continue)
    }

    fn flow_after_close(&self) -> Flow {
        if self.closing && self.in_flight == 0 {
            Flow::Exit
        } else {
            Flow::Continue
        }
    }

    fn dispatch(&mut self, commands: Vec<Command>) -> Result<(), AppError> {
        for command in commands {
            self.worker.dispatch(command)?;
            self.in_flight += 1;
        }
        Ok(())
    }
}
