//! Reading client configuration from the process environment.

use std::time::Duration;

use serial_test::serial;
use twigg::config::{
    ClientConfig, EndOfStreamPolicy, DEFAULT_API_URL, DEFAULT_PUBLISH_TIMEOUT, ENV_API_URL, ENV_END_OF_STREAM,
    ENV_IDLE_TIMEOUT, ENV_TOKEN,
};
use twigg::error::RequestError;
use twigg::generation::RunOptions;

fn clear_env() {
    for key in [ENV_API_URL, ENV_TOKEN, ENV_IDLE_TIMEOUT, ENV_END_OF_STREAM] {
        std::env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_from_env_defaults() {
    clear_env();

    let config = ClientConfig::from_env().unwrap();
    assert_eq!(config.base_url, DEFAULT_API_URL);
    assert!(config.token.is_none());
    assert!(config.idle_timeout.is_none());
    assert_eq!(config.end_of_stream, EndOfStreamPolicy::MarkFailed);
    assert_eq!(config.publish_timeout, DEFAULT_PUBLISH_TIMEOUT);
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_env();
    std::env::set_var(ENV_API_URL, "https://api.example.test/");
    std::env::set_var(ENV_TOKEN, "secret");
    std::env::set_var(ENV_IDLE_TIMEOUT, "30");
    std::env::set_var(ENV_END_OF_STREAM, "ignore");

    let config = ClientConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.endpoint("/drafts/stream"), "https://api.example.test/drafts/stream");
    assert_eq!(config.token.as_deref(), Some("secret"));

    let options = RunOptions::from(&config);
    assert_eq!(options.idle_timeout, Some(Duration::from_secs(30)));
    assert_eq!(options.end_of_stream, EndOfStreamPolicy::LeaveAsIs);
}

#[test]
#[serial]
fn test_from_env_rejects_bad_timeout() {
    clear_env();
    std::env::set_var(ENV_IDLE_TIMEOUT, "soon");

    let result = ClientConfig::from_env();
    clear_env();

    assert!(matches!(
        result,
        Err(RequestError::InvalidSetting { ref name, .. }) if name == ENV_IDLE_TIMEOUT
    ));
}
