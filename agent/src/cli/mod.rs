//! CLI request handling.
//!
//! Every operation a local CLI client can invoke lives on [`CliAgent`]. Each
//! one authorizes the caller, validates the request, calls into the host
//! through the contracts in [`crate::host`] and maps the outcome into a typed
//! response or a [`CliError`].

pub mod agent;
pub mod auth;
pub mod components;
pub mod debug;
pub mod deployments;
pub mod errors;
pub mod recipes;

pub use agent::{CliAgent, CliAgentOptions};
pub use auth::{authorize, cli_client_id, CLI_CLIENT_ID_PREFIX};
pub use errors::CliError;

/// Config namespace holding local deployment status records
pub const PERSISTENT_LOCAL_DEPLOYMENTS: &str = "_localDeployments";

/// Config namespace holding issued debug passwords
pub const DEBUG_PASSWORD_NAMESPACE: &str = "_debugPassword";

/// Username paired with every debug password
pub const DEBUG_USERNAME: &str = "debug";

/// Config namespace holding certificate fingerprints
pub const CERT_FINGERPRINT_NAMESPACE: &str = "_certificateFingerprint";

pub const SHA1_FINGERPRINT_KEY: &str = "SHA-1";
pub const SHA256_FINGERPRINT_KEY: &str = "SHA-256";

pub const DEPLOYMENTS_QUEUE_NOT_INITIALIZED: &str = "Deployment queue is not initialized";
