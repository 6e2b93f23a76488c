//! Debug password issuance

use chrono::{DateTime, TimeDelta, Utc};
use cli_models::{CreateDebugPasswordRequest, CreateDebugPasswordResponse};
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::cli::agent::CliAgent;
use crate::cli::auth::authorize;
use crate::cli::errors::CliError;
use crate::cli::{
    CERT_FINGERPRINT_NAMESPACE, DEBUG_PASSWORD_NAMESPACE, DEBUG_USERNAME, SHA1_FINGERPRINT_KEY,
    SHA256_FINGERPRINT_KEY,
};
use crate::host::config::{coerce_i64, coerce_string};
use crate::utils::random_url_safe;

/// Random bytes per password; encodes to 43 characters
pub const DEBUG_PASSWORD_BYTES: usize = 32;

/// Key of the expiration leaf under each password entry
pub const EXPIRATION_KEY: &str = "expiration";

impl CliAgent {
    /// Issue a new debug password and persist it with its expiration.
    ///
    /// Expired passwords found in the namespace are dropped on the way.
    pub fn create_debug_password(
        &self,
        caller: &str,
        _request: CreateDebugPasswordRequest,
    ) -> Result<CreateDebugPasswordResponse, CliError> {
        authorize(caller)?;

        let validity = TimeDelta::from_std(self.options.debug_password_validity)
            .map_err(|e| CliError::ServiceError(format!("Invalid password validity: {}", e)))?;
        let now = Utc::now();
        // Millisecond precision so the response matches what is stored
        let expiration = DateTime::from_timestamp_millis((now + validity).timestamp_millis())
            .ok_or_else(|| CliError::ServiceError("Password expiration out of range".to_string()))?;

        self.remove_expired_debug_passwords(now);

        let password = SecretString::from(random_url_safe(DEBUG_PASSWORD_BYTES));
        let mut entry = Map::new();
        entry.insert(
            EXPIRATION_KEY.to_string(),
            Value::from(expiration.timestamp_millis()),
        );
        self.config.replace(
            &[
                DEBUG_PASSWORD_NAMESPACE,
                DEBUG_USERNAME,
                password.expose_secret(),
            ],
            entry,
        )?;
        info!("Issued debug password for {} valid until {}", caller, expiration);

        Ok(CreateDebugPasswordResponse {
            username: DEBUG_USERNAME.to_string(),
            password: password.expose_secret().to_string(),
            password_expiration: expiration,
            certificate_sha1_hash: self.certificate_fingerprint(SHA1_FINGERPRINT_KEY),
            certificate_sha256_hash: self.certificate_fingerprint(SHA256_FINGERPRINT_KEY),
        })
    }

    fn certificate_fingerprint(&self, algorithm: &str) -> Option<String> {
        self.config
            .find(&[CERT_FINGERPRINT_NAMESPACE, algorithm])
            .as_ref()
            .and_then(coerce_string)
    }

    fn remove_expired_debug_passwords(&self, now: DateTime<Utc>) {
        let entries = match self.config.find(&[DEBUG_PASSWORD_NAMESPACE, DEBUG_USERNAME]) {
            Some(Value::Object(entries)) => entries,
            _ => return,
        };

        let now_millis = now.timestamp_millis();
        for (password, entry) in entries {
            let expired = entry
                .get(EXPIRATION_KEY)
                .and_then(coerce_i64)
                .map_or(true, |expiration| expiration <= now_millis);
            if !expired {
                continue;
            }
            match self
                .config
                .remove(&[DEBUG_PASSWORD_NAMESPACE, DEBUG_USERNAME, password.as_str()])
            {
                Ok(_) => debug!("Removed expired debug password"),
                Err(e) => warn!("Failed to remove expired debug password: {}", e),
            }
        }
    }
}
