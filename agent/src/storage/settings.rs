//! Settings file management

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::logs::LogLevel;

/// Agent settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub log_level: LogLevel,

    /// Emit JSON log lines instead of plain text
    #[serde(default)]
    pub log_json: bool,

    /// Also write daily-rotated log files under the logs directory
    #[serde(default)]
    pub log_to_file: bool,

    #[serde(default)]
    pub server: ServerSettings,

    /// Capacity of the local deployment queue
    #[serde(default = "default_deployment_queue_capacity")]
    pub deployment_queue_capacity: usize,

    /// How long an issued debug password stays valid, in seconds
    #[serde(default = "default_debug_password_validity_secs")]
    pub debug_password_validity_secs: u64,

    /// PEM certificate whose fingerprints are returned with debug passwords
    #[serde(default)]
    pub debug_certificate_path: Option<String>,

    /// CLI clients that get a token and an IPC info file at startup
    #[serde(default = "default_cli_clients")]
    pub cli_clients: Vec<String>,

    /// Components registered with the standalone host at startup
    #[serde(default)]
    pub components: HashMap<String, ComponentSettings>,
}

fn default_deployment_queue_capacity() -> usize {
    16
}

fn default_debug_password_validity_secs() -> u64 {
    8 * 60 * 60
}

fn default_cli_clients() -> Vec<String> {
    vec!["default".to_string()]
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            log_json: false,
            log_to_file: false,
            server: ServerSettings::default(),
            deployment_queue_capacity: default_deployment_queue_capacity(),
            debug_password_validity_secs: default_debug_password_validity_secs(),
            debug_certificate_path: None,
            cli_clients: default_cli_clients(),
            components: HashMap::new(),
        }
    }
}

/// Local HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_server_host")]
    pub host: String,

    #[serde(default = "default_server_port")]
    pub port: u16,
}

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    8090
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
        }
    }
}

/// A component seeded into the standalone host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentSettings {
    pub version: String,

    #[serde(default)]
    pub configuration: Map<String, Value>,
}
