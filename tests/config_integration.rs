// tests/config_integration.rs
//
// The environment is process-global, so every `from_env` case lives in one test.

use riskmap_rs::config::{DEFAULT_COUNTRY, DEFAULT_GEOCODER_URL, DEFAULT_TIMEOUT};
use riskmap_rs::{GeocodeError, GeocoderConfig};
use std::env;
use std::time::Duration;

const VARS: [&str; 4] = [
    "RISKMAP_GEOCODER_URL",
    "RISKMAP_COUNTRY",
    "RISKMAP_TIMEOUT_SECS",
    "RISKMAP_USER_AGENT",
];

fn clear_vars() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
fn test_from_env_overrides_and_fallbacks() {
    clear_vars();

    // Nothing set: defaults.
    let config = GeocoderConfig::from_env().expect("Defaults should load");
    assert_eq!(config.base_url, DEFAULT_GEOCODER_URL);
    assert_eq!(config.country.as_deref(), Some(DEFAULT_COUNTRY));
    assert_eq!(config.timeout, Some(DEFAULT_TIMEOUT));
    assert_eq!(config, GeocoderConfig::default());

    // Blank country disables the qualifier, zero disables the timeout.
    env::set_var("RISKMAP_COUNTRY", "  ");
    env::set_var("RISKMAP_TIMEOUT_SECS", "0");
    let config = GeocoderConfig::from_env().expect("Blank country and zero timeout are valid");
    assert_eq!(config.country, None);
    assert_eq!(config.timeout, None);

    // Non-numeric timeout is rejected.
    env::set_var("RISKMAP_TIMEOUT_SECS", "abc");
    match GeocoderConfig::from_env() {
        Err(GeocodeError::InvalidInput(message)) => {
            assert!(message.contains("'abc'"), "message: {}", message)
        }
        other => panic!("Expected InvalidInput, got {:?}", other),
    }

    // Regular values are taken as given.
    env::set_var("RISKMAP_GEOCODER_URL", "http://geocoder.internal:8080");
    env::set_var("RISKMAP_COUNTRY", "Nepal");
    env::set_var("RISKMAP_TIMEOUT_SECS", " 7 ");
    env::set_var("RISKMAP_USER_AGENT", "crop-risk-dashboard/2.1");
    let config = GeocoderConfig::from_env().expect("Valid overrides should load");
    assert_eq!(config.base_url, "http://geocoder.internal:8080");
    assert_eq!(config.country.as_deref(), Some("Nepal"));
    assert_eq!(config.timeout, Some(Duration::from_secs(7)));
    assert_eq!(config.user_agent, "crop-risk-dashboard/2.1");

    clear_vars();
}
