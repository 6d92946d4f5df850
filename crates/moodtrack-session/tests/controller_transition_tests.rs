//! Integration tests for session controller transitions.

mod common;

use moodtrack_core::{
    Credentials, Draft, FailureReason, Field, Happiness, Screen, SupportNotice,
};
use moodtrack_session::{Command, Completion, Event, SessionController, SessionError};
use rstest::rstest;

use common::{entry, logged_in, login_failed, login_succeeded, type_into};

#[rstest]
#[case(Event::SwitchToSignup, Screen::Signup)]
#[case(Event::SwitchToLogin, Screen::Login)]
fn controller_transition_tests_switch_clears_draft_and_error(
    #[case] event: Event,
    #[case] target: Screen,
) {
    let mut controller = SessionController::new();
    let reply = login_failed(&controller, "bad creds");
    controller.apply(reply);
    type_into(&mut controller, Field::Email, "a@x.com");

    controller.handle(event).expect("switch is legal while logged out");

    let state = controller.state();
    assert_eq!(state.screen(), target);
    assert_eq!(state.draft(), &Draft::empty_for(target));
    assert_eq!(state.error(), None);
    assert!(state.is_consistent());
}

#[test]
fn controller_transition_tests_login_submit_emits_trimmed_credentials() {
    let mut controller = SessionController::new();
    type_into(&mut controller, Field::Email, "  a@x.com ");
    type_into(&mut controller, Field::Password, "pw");

    let commands = controller.handle(Event::Submit).expect("form is complete");

    assert_eq!(
        commands,
        vec![Command::Login {
            epoch: controller.state().epoch(),
            credentials: Credentials {
                email: "a@x.com".to_string(),
                password: "pw".to_string(),
            },
        }]
    );
    assert_eq!(controller.state().screen(), Screen::Login);
}

#[test]
fn controller_transition_tests_incomplete_login_emits_nothing() {
    let mut controller = SessionController::new();
    type_into(&mut controller, Field::Email, "a@x.com");
    let before = controller.state().clone();

    let result = controller.handle(Event::Submit);

    assert!(matches!(result, Err(SessionError::Draft(_))));
    assert_eq!(controller.state(), &before);
}

#[test]
fn controller_transition_tests_login_success_requests_both_refreshes() {
    let (controller, commands) = logged_in("a@x.com");
    let state = controller.state();
    let epoch = state.epoch();

    assert_eq!(state.screen(), Screen::Dashboard);
    assert_eq!(state.identity().map(|id| id.email()), Some("a@x.com"));
    assert_eq!(
        commands,
        vec![
            Command::LoadEntries {
                epoch,
                email: "a@x.com".to_string()
            },
            Command::LoadStreak {
                epoch,
                email: "a@x.com".to_string()
            },
        ]
    );
    assert!(state.is_consistent());
}

#[test]
fn controller_transition_tests_login_failure_shows_reason_and_keeps_draft() {
    let mut controller = SessionController::new();
    type_into(&mut controller, Field::Email, "a@x.com");
    type_into(&mut controller, Field::Password, "wrong");
    controller.handle(Event::Submit).expect("form is complete");

    let reply = login_failed(&controller, "bad creds");
    let commands = controller.apply(reply);

    let state = controller.state();
    assert!(commands.is_empty());
    assert_eq!(state.screen(), Screen::Login);
    assert_eq!(state.error(), Some("bad creds"));
    assert_eq!(state.draft().get(Field::Email), Some("a@x.com"));
    assert!(state.identity().is_none());
}

#[test]
fn controller_transition_tests_signup_success_returns_to_login() {
    let mut controller = SessionController::new();
    controller.handle(Event::SwitchToSignup).expect("legal switch");
    for (field, value) in [
        (Field::Email, "new@x.com"),
        (Field::Password, "pw"),
        (Field::Age, "30"),
        (Field::Gender, "female"),
        (Field::CopingMechanisms, "running"),
    ] {
        type_into(&mut controller, field, value);
    }
    let commands = controller.handle(Event::Submit).expect("form is complete");
    assert!(matches!(commands.as_slice(), [Command::Signup(_)]));

    controller.apply(Completion::SignedUp(Ok(())));

    let state = controller.state();
    assert_eq!(state.screen(), Screen::Login);
    assert!(state.draft().is_empty());
    assert_eq!(state.error(), None);
}

#[test]
fn controller_transition_tests_signup_failure_stays_on_signup() {
    let mut controller = SessionController::new();
    controller.handle(Event::SwitchToSignup).expect("legal switch");

    controller.apply(Completion::SignedUp(Err(FailureReason::new(
        "User already exists",
    ))));

    assert_eq!(controller.state().screen(), Screen::Signup);
    assert_eq!(controller.state().error(), Some("User already exists"));
}

#[test]
fn controller_transition_tests_add_entry_success_resets_draft_and_refreshes() {
    let (mut controller, _) = logged_in("a@x.com");
    type_into(&mut controller, Field::Highlight, "sun");
    type_into(&mut controller, Field::Lowlight, "traffic");
    type_into(&mut controller, Field::Happiness, "3");
    type_into(&mut controller, Field::MajorEvent, "none");
    let epoch = controller.state().epoch();

    let commands = controller.handle(Event::Submit).expect("form is complete");
    let [Command::AddEntry { entry, .. }] = commands.as_slice() else {
        panic!("expected a single add-entry command, got {commands:?}");
    };
    let happiness = entry.happiness;

    let follow_up = controller.apply(Completion::EntryAdded {
        epoch,
        happiness,
        result: Ok(()),
    });

    let state = controller.state();
    assert_eq!(follow_up.len(), 2);
    assert!(state.draft().is_empty());
    assert_eq!(state.notice(), Some(SupportNotice::GentleReminder));
    assert_eq!(state.error(), None);
}

#[test]
fn controller_transition_tests_add_entry_failure_keeps_draft() {
    let (mut controller, _) = logged_in("a@x.com");
    type_into(&mut controller, Field::Highlight, "sun");
    type_into(&mut controller, Field::Lowlight, "traffic");
    type_into(&mut controller, Field::Happiness, "8");
    type_into(&mut controller, Field::MajorEvent, "none");
    let epoch = controller.state().epoch();
    controller.apply(Completion::EntriesLoaded {
        epoch,
        email: "a@x.com".to_string(),
        result: Ok(vec![entry("2024-05-01T10:00:00", 6)]),
    });
    controller.apply(Completion::StreakLoaded {
        epoch,
        email: "a@x.com".to_string(),
        result: Ok(4),
    });
    controller.handle(Event::Submit).expect("form is complete");

    let follow_up = controller.apply(Completion::EntryAdded {
        epoch,
        happiness: Happiness::new(8).expect("in range"),
        result: Err(FailureReason::new("Failed to add entry")),
    });

    let state = controller.state();
    assert!(follow_up.is_empty());
    assert_eq!(state.error(), Some("Failed to add entry"));
    assert_eq!(state.draft().get(Field::Highlight), Some("sun"));
    assert_eq!(state.notice(), None);
    assert_eq!(state.entries().len(), 1);
    assert_eq!(state.entries()[0].happiness.value(), 6);
    assert_eq!(state.streak(), Some(4));
}

#[test]
fn controller_transition_tests_out_of_range_happiness_rejected_locally() {
    let (mut controller, _) = logged_in("a@x.com");
    type_into(&mut controller, Field::Highlight, "sun");
    type_into(&mut controller, Field::Lowlight, "traffic");
    type_into(&mut controller, Field::Happiness, "11");
    type_into(&mut controller, Field::MajorEvent, "none");

    assert!(controller.handle(Event::Submit).is_err());
}

#[test]
fn controller_transition_tests_entries_refresh_is_idempotent() {
    let (mut controller, _) = logged_in("a@x.com");
    let epoch = controller.state().epoch();
    let completion = Completion::EntriesLoaded {
        epoch,
        email: "a@x.com".to_string(),
        result: Ok(vec![entry("2024-05-01T10:00:00", 7)]),
    };

    controller.apply(completion.clone());
    let once = controller.state().clone();
    controller.apply(completion);

    assert_eq!(controller.state(), &once);
    assert_eq!(once.entries().len(), 1);
}

#[test]
fn controller_transition_tests_refresh_failure_keeps_previous_data() {
    let (mut controller, _) = logged_in("a@x.com");
    let epoch = controller.state().epoch();
    let email = "a@x.com".to_string();
    controller.apply(Completion::StreakLoaded {
        epoch,
        email: email.clone(),
        result: Ok(4),
    });

    controller.apply(Completion::StreakLoaded {
        epoch,
        email,
        result: Err(FailureReason::new("Failed to load streak")),
    });

    assert_eq!(controller.state().streak(), Some(4));
    assert_eq!(controller.state().error(), None);
}

#[test]
fn controller_transition_tests_low_recent_entries_raise_reach_out_notice() {
    let (mut controller, _) = logged_in("a@x.com");
    let epoch = controller.state().epoch();
    let entries = (1..=5)
        .map(|day| entry(&format!("2024-05-0{day}T09:00:00"), 2))
        .collect();

    controller.apply(Completion::EntriesLoaded {
        epoch,
        email: "a@x.com".to_string(),
        result: Ok(entries),
    });

    assert_eq!(controller.state().notice(), Some(SupportNotice::ReachOut));
}

#[test]
fn controller_transition_tests_logout_clears_session_data() {
    let (mut controller, _) = logged_in("a@x.com");
    let epoch = controller.state().epoch();
    controller.apply(Completion::StreakLoaded {
        epoch,
        email: "a@x.com".to_string(),
        result: Ok(3),
    });

    controller.handle(Event::Logout).expect("logged in");

    let state = controller.state();
    assert_eq!(state.screen(), Screen::Login);
    assert!(state.identity().is_none());
    assert!(state.entries().is_empty());
    assert_eq!(state.streak(), None);
    assert!(state.is_consistent());
}

#[rstest]
#[case(Event::Logout)]
#[case(Event::Refresh)]
fn controller_transition_tests_dashboard_actions_need_a_session(#[case] event: Event) {
    let mut controller = SessionController::new();
    assert!(matches!(
        controller.handle(event),
        Err(SessionError::InvalidTransition { .. })
    ));
}

#[test]
fn controller_transition_tests_login_logout_login_round_trip() {
    let (mut controller, _) = logged_in("a@x.com");
    controller.handle(Event::Logout).expect("logged in");

    let reply = login_succeeded(&controller, "b@x.com");
    let commands = controller.apply(reply);

    let state = controller.state();
    assert_eq!(state.identity().map(|id| id.email()), Some("b@x.com"));
    assert!(state.entries().is_empty());
    assert_eq!(state.streak(), None);
    assert!(commands.iter().all(|command| matches!(
        command,
        Command::LoadEntries { email, .. } | Command::LoadStreak { email, .. }
            if email == "b@x.com"
    )));
}
