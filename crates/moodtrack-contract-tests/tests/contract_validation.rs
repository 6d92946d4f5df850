//! Validates contract fixtures and gateway traffic against frozen JSON schemas.

use std::sync::{Arc, Mutex};

use moodtrack_contract_tests::{compile_validator, load_fixture, violations};
use moodtrack_core::{Credentials, Gender, Happiness, NewEntry, Registration};
use moodtrack_gateway::{ApiRequest, ApiResponse, BackendTransport, Gateway, TransportError};
use serde_json::{Value, json};

/// Transport recording request bodies and answering every call with `reply`.
struct RecordingTransport {
    reply: ApiResponse,
    bodies: Mutex<Vec<Value>>,
}

impl RecordingTransport {
    fn new(status: u16, reply: &Value) -> Arc<Self> {
        Arc::new(Self {
            reply: ApiResponse::json(status, reply),
            bodies: Mutex::new(Vec::new()),
        })
    }

    fn only_body(&self) -> Value {
        let bodies = self.bodies.lock().expect("body log lock");
        assert_eq!(bodies.len(), 1, "expected exactly one request body");
        bodies[0].clone()
    }
}

impl BackendTransport for RecordingTransport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        if let Some(body) = &request.body {
            self.bodies.lock().expect("body log lock").push(body.clone());
        }
        Ok(self.reply.clone())
    }
}

fn gateway(transport: Arc<RecordingTransport>) -> Gateway {
    Gateway::new("http://localhost:5000", transport).expect("gateway should build")
}

fn assert_valid(schema: &str, instance: &Value) {
    let validator = compile_validator(schema).expect("schema should compile");
    let problems = violations(&validator, instance);
    assert!(problems.is_empty(), "{schema} violations: {problems:?}");
}

#[test]
fn contract_validation_valid_fixtures_match_their_schemas() {
    for name in [
        "signup-request",
        "login-request",
        "add-entry-request",
        "login-response",
        "entries-response",
        "streak-response",
        "error-response",
    ] {
        let fixture = load_fixture(&format!("{name}.valid")).expect("fixture should load");
        assert_valid(name, &fixture);
    }
}

#[test]
fn contract_validation_string_happiness_is_rejected_on_requests() {
    let validator = compile_validator("add-entry-request").expect("schema should compile");
    let fixture = load_fixture("add-entry-request.invalid").expect("fixture should load");
    assert!(!validator.is_valid(&fixture));
}

#[test]
fn contract_validation_gateway_signup_body_matches_schema() {
    let transport = RecordingTransport::new(201, &json!({"message": "User created"}));
    gateway(transport.clone())
        .signup(&Registration {
            email: "sam@example.com".to_string(),
            password: "pw".to_string(),
            age: 29,
            gender: Gender::RatherNotSay,
            coping_mechanisms: "walking".to_string(),
        })
        .expect("signup should succeed");

    assert_valid("signup-request", &transport.only_body());
}

#[test]
fn contract_validation_gateway_login_body_matches_schema() {
    let fixture = load_fixture("login-response.valid").expect("fixture should load");
    let transport = RecordingTransport::new(200, &fixture);
    let identity = gateway(transport.clone())
        .login(&Credentials {
            email: "sam@example.com".to_string(),
            password: "pw".to_string(),
        })
        .expect("login should succeed");

    assert_eq!(identity.email(), "sam@example.com");
    assert_valid("login-request", &transport.only_body());
}

#[test]
fn contract_validation_gateway_add_entry_body_matches_schema() {
    let transport = RecordingTransport::new(201, &json!({"message": "Entry added"}));
    gateway(transport.clone())
        .add_entry(
            "sam@example.com",
            &NewEntry {
                highlight: "sun".to_string(),
                lowlight: "rain".to_string(),
                happiness: Happiness::new(10).expect("in range"),
                major_event: "trip".to_string(),
            },
        )
        .expect("add entry should succeed");

    assert_valid("add-entry-request", &transport.only_body());
}

#[test]
fn contract_validation_response_fixtures_decode_through_gateway() {
    let entries = load_fixture("entries-response.valid").expect("fixture should load");
    let decoded = gateway(RecordingTransport::new(200, &entries))
        .list_entries("sam@example.com")
        .expect("entries should decode");
    assert_eq!(decoded.len(), 2);
    assert_eq!(decoded[1].happiness.value(), 4);

    let streak = load_fixture("streak-response.valid").expect("fixture should load");
    let decoded = gateway(RecordingTransport::new(200, &streak))
        .get_streak("sam@example.com")
        .expect("streak should decode");
    assert_eq!(decoded, 2);

    let error = load_fixture("error-response.valid").expect("fixture should load");
    let reason = gateway(RecordingTransport::new(409, &error))
        .signup(&Registration {
            email: "sam@example.com".to_string(),
            password: "pw".to_string(),
            age: 29,
            gender: Gender::Male,
            coping_mechanisms: "walking".to_string(),
        })
        .unwrap_err();
    assert_eq!(reason.as_str(), "User already exists");
}
