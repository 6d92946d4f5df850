//! Benchmark smoke test for the decode -> apply -> render loop.

use std::time::Instant;

use moodtrack_benchmarks::synthetic_entries;
use moodtrack_core::Identity;
use moodtrack_gateway::wire::EntriesResponse;
use moodtrack_session::{Completion, SessionController};
use moodtrack_ui::View;
use serde_json::json;

#[test]
fn benchmark_refresh_loop_smoke_prints_latency() {
    let entries = synthetic_entries(500).expect("synthetic entries should build");
    let body = serde_json::to_vec(&json!({ "entries": entries })).expect("entries should encode");

    let mut controller = SessionController::new();
    controller.apply(Completion::LoggedIn {
        epoch: controller.state().epoch(),
        result: Ok(Identity::new("bench@x.com").expect("valid email")),
    });
    let epoch = controller.state().epoch();

    let start = Instant::now();
    let mut rendered_bytes = 0usize;

    for _ in 0..100 {
        let decoded: EntriesResponse =
            serde_json::from_slice(&body).expect("entries should decode");
        controller.apply(Completion::EntriesLoaded {
            epoch,
            email: "bench@x.com".to_string(),
            result: Ok(decoded.into_entries()),
        });
        rendered_bytes += View::project(controller.state(), "bench").render().len();
    }

    let elapsed_ms = start.elapsed().as_millis();
    println!("benchmark_refresh_loop_elapsed_ms={elapsed_ms}");
    println!("benchmark_rendered_total_bytes={rendered_bytes}");

    assert_eq!(controller.state().entries().len(), 500);
    // Lightweight guardrail; strict latency targets are environment-specific.
    assert!(
        elapsed_ms < 10_000,
        "refresh loop smoke benchmark should stay bounded"
    );
}
