//! Integration tests for configuration loading and key resolution.

use std::fs;
use std::time::Duration;

use motion_config::auth::resolve_api_key_with;
use motion_config::{Config, ConfigError, env};
use secrecy::ExposeSecret;
use tempfile::TempDir;

#[test]
fn local_file_wins_over_user_file() {
    let local = TempDir::new().unwrap();
    let user = TempDir::new().unwrap();
    fs::write(
        local.path().join("motion.json5"),
        r#"{ rate_limit: { per_minute: 20 } }"#,
    )
    .unwrap();
    fs::write(
        user.path().join("config.json5"),
        r#"{ rate_limit: { per_minute: 40 }, request_timeout_secs: 5 }"#,
    )
    .unwrap();

    let config = Config::load_with(local.path(), Some(user.path()), |_| None).unwrap();
    assert_eq!(config.rate_limit.per_minute, 20);
    assert_eq!(config.request_timeout(), Duration::from_secs(30));
}

#[test]
fn user_file_is_used_when_no_local_file() {
    let local = TempDir::new().unwrap();
    let user = TempDir::new().unwrap();
    fs::write(
        user.path().join("config.json"),
        r#"{"base_url": "https://motion.internal/v1"}"#,
    )
    .unwrap();

    let config = Config::load_with(local.path(), Some(user.path()), |_| None).unwrap();
    assert_eq!(config.base_url, "https://motion.internal/v1");
}

#[test]
fn environment_overrides_files_and_key() {
    let local = TempDir::new().unwrap();
    fs::write(
        local.path().join("motion.json5"),
        r#"{
            api_key: "from_file",
            base_url: "https://file.example.com/v1",
        }"#,
    )
    .unwrap();

    let lookup = |name: &str| match name {
        env::API_KEY => Some("from_env".to_string()),
        env::BASE_URL => Some("http://localhost:8080".to_string()),
        _ => None,
    };

    let config = Config::load_with(local.path(), None, lookup).unwrap();
    assert_eq!(config.base_url, "http://localhost:8080");
    let key = resolve_api_key_with(&config, lookup).unwrap();
    assert_eq!(key.expose_secret(), "from_env");

    let key = resolve_api_key_with(&config, |_| None).unwrap();
    assert_eq!(key.expose_secret(), "from_file");
}

#[test]
fn missing_key_is_reported() {
    let config = Config::default();
    let err = resolve_api_key_with(&config, |_| None).unwrap_err();
    assert!(matches!(err, ConfigError::MissingApiKey));
    assert_eq!(
        err.to_string(),
        "MOTION_API_KEY environment variable is required"
    );
}

#[test]
fn malformed_file_is_an_error() {
    let local = TempDir::new().unwrap();
    fs::write(local.path().join("motion.json5"), "{ rate_limit: ").unwrap();

    let err = Config::load_with(local.path(), None, |_| None).unwrap_err();
    assert!(matches!(err, ConfigError::ParseJson5(_)));
}

#[test]
fn out_of_range_values_are_rejected() {
    let dir = TempDir::new().unwrap();
    for (body, expected) in [
        (r#"{ rate_limit: { per_minute: 0 } }"#, "rate limit"),
        (r#"{ rate_limit: { safety_percent: 150 } }"#, "rate limit"),
        (r#"{ retry: { max_attempts: 11 } }"#, "retry"),
        (r#"{ request_timeout_secs: 0 }"#, "timeout"),
        (r#"{ base_url: "ftp://motion" }"#, "base URL"),
    ] {
        let path = dir.path().join("config.json5");
        fs::write(&path, body).unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains(expected), "{body}: {err}");
    }
}
