//! Shared fixtures for session integration tests.

use moodtrack_core::{Entry, FailureReason, Field, Happiness, Identity, Timestamp};
use moodtrack_session::{Command, Completion, Event, SessionController};

/// Drives a fresh controller through a successful login for `email`.
///
/// Returns the controller and the refresh commands the login emitted.
#[allow(dead_code)]
pub fn logged_in(email: &str) -> (SessionController, Vec<Command>) {
    let mut controller = SessionController::new();
    let reply = login_succeeded(&controller, email);
    let commands = controller
        .handle(Event::Completed(reply))
        .expect("completions are always accepted");
    (controller, commands)
}

/// Successful login reply for a login submitted in the current epoch.
#[allow(dead_code)]
pub fn login_succeeded(controller: &SessionController, email: &str) -> Completion {
    Completion::LoggedIn {
        epoch: controller.state().epoch(),
        result: Ok(Identity::new(email).expect("fixture email should be valid")),
    }
}

/// Failed login reply for a login submitted in the current epoch.
#[allow(dead_code)]
pub fn login_failed(controller: &SessionController, reason: &str) -> Completion {
    Completion::LoggedIn {
        epoch: controller.state().epoch(),
        result: Err(FailureReason::new(reason)),
    }
}

/// Edits `field` on the active form.
#[allow(dead_code)]
pub fn type_into(controller: &mut SessionController, field: Field, value: &str) {
    controller
        .handle(Event::FieldChanged {
            field,
            value: value.to_string(),
        })
        .expect("field should belong to the active form");
}

/// Builds an entry with the given timestamp and score.
#[allow(dead_code)]
pub fn entry(timestamp: &str, happiness: i64) -> Entry {
    Entry {
        timestamp: Timestamp::new(timestamp),
        highlight: "walk".to_string(),
        lowlight: "rain".to_string(),
        happiness: Happiness::new(happiness).expect("fixture score should be in range"),
        major_event: String::new(),
    }
}
