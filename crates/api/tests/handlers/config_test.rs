use std::collections::HashMap;

use coursedesk_api::config::ApiConfig;
use pretty_assertions::assert_eq;
use tracing::Level;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn test_defaults() {
    let config = ApiConfig::from_lookup(lookup(&[])).unwrap();

    assert_eq!(config.server_addr(), "0.0.0.0:5050");
    assert_eq!(config.database_url, None);
    assert_eq!(config.log_level, Level::INFO);
    assert_eq!(config.cors_origins, None);
    assert_eq!(config.request_timeout, 30);
}

#[test]
fn test_overrides() {
    let config = ApiConfig::from_lookup(lookup(&[
        ("API_HOST", "127.0.0.1"),
        ("API_PORT", "8080"),
        ("DATABASE_URL", "postgres://localhost/courses"),
        ("LOG_LEVEL", "DEBUG"),
        ("API_CORS_ORIGINS", "http://a.test, ,http://b.test"),
        ("API_REQUEST_TIMEOUT_SECONDS", "5"),
    ]))
    .unwrap();

    assert_eq!(config.server_addr(), "127.0.0.1:8080");
    assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/courses"));
    assert_eq!(config.log_level, Level::DEBUG);
    assert_eq!(
        config.cors_origins,
        Some(vec!["http://a.test".to_string(), "http://b.test".to_string()])
    );
    assert_eq!(config.request_timeout, 5);
}

#[test]
fn test_blank_database_url_means_memory_store() {
    let config = ApiConfig::from_lookup(lookup(&[("DATABASE_URL", "  ")])).unwrap();
    assert_eq!(config.database_url, None);
}

#[test]
fn test_invalid_port_is_an_error() {
    assert!(ApiConfig::from_lookup(lookup(&[("API_PORT", "eighty")])).is_err());
}
