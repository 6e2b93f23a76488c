//! Debug password tests

use chrono::{TimeDelta, Utc};
use cli_agent::cli::{
    CliError, CERT_FINGERPRINT_NAMESPACE, DEBUG_PASSWORD_NAMESPACE, DEBUG_USERNAME,
    SHA1_FINGERPRINT_KEY, SHA256_FINGERPRINT_KEY,
};
use cli_agent::host::ConfigStore;
use cli_models::CreateDebugPasswordRequest;
use serde_json::{json, Value};

use crate::mocks::{caller, default_components, fixture};

#[test]
fn test_create_debug_password() {
    let f = fixture(default_components());
    let before = Utc::now();

    let response = f
        .agent
        .create_debug_password(&caller(), CreateDebugPasswordRequest::default())
        .unwrap();
    assert_eq!(response.username, "debug");
    assert_eq!(response.password.len(), 43);
    assert!(response.certificate_sha1_hash.is_none());
    assert!(response.certificate_sha256_hash.is_none());

    // Default validity is eight hours
    let validity = response.password_expiration - before;
    assert!(validity > TimeDelta::hours(8) - TimeDelta::seconds(5));
    assert!(validity <= TimeDelta::hours(8) + TimeDelta::seconds(5));

    let stored = f
        .config
        .find(&[
            DEBUG_PASSWORD_NAMESPACE,
            DEBUG_USERNAME,
            response.password.as_str(),
            "expiration",
        ])
        .unwrap();
    assert_eq!(stored, json!(response.password_expiration.timestamp_millis()));
}

#[test]
fn test_debug_password_includes_fingerprints() {
    let f = fixture(default_components());
    f.config
        .write(&[CERT_FINGERPRINT_NAMESPACE, SHA1_FINGERPRINT_KEY], json!("AA:BB"))
        .unwrap();
    f.config
        .write(&[CERT_FINGERPRINT_NAMESPACE, SHA256_FINGERPRINT_KEY], json!("CC:DD"))
        .unwrap();

    let response = f
        .agent
        .create_debug_password(&caller(), CreateDebugPasswordRequest::default())
        .unwrap();
    assert_eq!(response.certificate_sha1_hash.as_deref(), Some("AA:BB"));
    assert_eq!(response.certificate_sha256_hash.as_deref(), Some("CC:DD"));
}

#[test]
fn test_each_password_is_distinct() {
    let f = fixture(default_components());
    let first = f
        .agent
        .create_debug_password(&caller(), CreateDebugPasswordRequest::default())
        .unwrap();
    let second = f
        .agent
        .create_debug_password(&caller(), CreateDebugPasswordRequest::default())
        .unwrap();
    assert_ne!(first.password, second.password);

    let entries = f.config.find(&[DEBUG_PASSWORD_NAMESPACE, DEBUG_USERNAME]).unwrap();
    assert_eq!(entries.as_object().unwrap().len(), 2);
}

#[test]
fn test_expired_passwords_removed() {
    let f = fixture(default_components());
    let expired = (Utc::now() - TimeDelta::hours(1)).timestamp_millis();
    f.config
        .write(
            &[DEBUG_PASSWORD_NAMESPACE, DEBUG_USERNAME, "stale"],
            json!({"expiration": expired}),
        )
        .unwrap();

    let response = f
        .agent
        .create_debug_password(&caller(), CreateDebugPasswordRequest::default())
        .unwrap();

    let entries = f.config.find(&[DEBUG_PASSWORD_NAMESPACE, DEBUG_USERNAME]).unwrap();
    let entries = entries.as_object().unwrap();
    assert!(!entries.contains_key("stale"));
    assert!(entries.contains_key(&response.password));
}

#[test]
fn test_debug_password_unauthorized() {
    let f = fixture(default_components());
    let result = f
        .agent
        .create_debug_password("TestService", CreateDebugPasswordRequest::default());
    assert!(matches!(result, Err(CliError::Unauthorized(_))));
    assert_eq!(f.config.find(&[DEBUG_PASSWORD_NAMESPACE]), None::<Value>);
}
