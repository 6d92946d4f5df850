//! Integration tests for configuration parsing and gateway construction.

use moodtrack_app::{AppConfig, AppError, DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};
use rstest::rstest;

#[test]
fn config_gateway_tests_defaults_build_local_gateway() {
    let config = AppConfig {
        api_url: DEFAULT_API_URL.to_string(),
        timeout_secs: DEFAULT_TIMEOUT_SECS,
        log_filter: "warn".to_string(),
    };

    let gateway = config.build_gateway().expect("default config should build");

    assert_eq!(gateway.base_url().as_str(), "http://localhost:5000/");
}

#[rstest]
#[case("ftp://mood.example.com")]
#[case("https://mood.example.com/?debug=1")]
#[case("not a url")]
fn config_gateway_tests_rejects_bad_base_urls(#[case] api_url: &str) {
    let config = AppConfig {
        api_url: api_url.to_string(),
        timeout_secs: 5,
        log_filter: "warn".to_string(),
    };

    assert!(matches!(config.build_gateway(), Err(AppError::Config(_))));
}
