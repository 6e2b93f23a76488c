//! Debug password models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateDebugPasswordRequest {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDebugPasswordResponse {
    pub username: String,
    pub password: String,
    pub password_expiration: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_sha1_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_sha256_hash: Option<String>,
}
