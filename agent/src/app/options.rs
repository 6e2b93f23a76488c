//! Application configuration options

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::cli::CliAgentOptions;
use crate::storage::layout::StorageLayout;
use crate::storage::settings::{ComponentSettings, Settings};

/// Main application options
#[derive(Debug, Clone, Default)]
pub struct AppOptions {
    pub lifecycle: LifecycleOptions,

    /// Storage layout paths
    pub layout: StorageLayout,

    pub server: ServerOptions,

    /// Options handed to the CLI agent
    pub cli: CliAgentOptions,

    pub host: HostOptions,

    /// CLI clients issued a token at startup
    pub cli_clients: Vec<String>,

    /// PEM certificate to fingerprint at startup
    pub debug_certificate_path: Option<PathBuf>,
}

impl AppOptions {
    /// Build options from a settings file rooted at `layout`
    pub fn from_settings(layout: StorageLayout, settings: &Settings) -> Self {
        Self {
            lifecycle: LifecycleOptions::default(),
            layout,
            server: ServerOptions {
                host: settings.server.host.clone(),
                port: settings.server.port,
            },
            cli: CliAgentOptions {
                debug_password_validity: Duration::from_secs(settings.debug_password_validity_secs),
            },
            host: HostOptions {
                deployment_queue_capacity: settings.deployment_queue_capacity,
                components: settings.components.clone(),
            },
            cli_clients: settings.cli_clients.clone(),
            debug_certificate_path: settings.debug_certificate_path.as_ref().map(PathBuf::from),
        }
    }
}

/// Lifecycle options for the agent
#[derive(Debug, Clone)]
pub struct LifecycleOptions {
    /// Maximum delay for graceful shutdown
    pub max_shutdown_delay: Duration,
}

impl Default for LifecycleOptions {
    fn default() -> Self {
        Self {
            max_shutdown_delay: Duration::from_secs(30),
        }
    }
}

/// Standalone host options
#[derive(Debug, Clone)]
pub struct HostOptions {
    pub deployment_queue_capacity: usize,

    /// Components registered at startup, by name
    pub components: HashMap<String, ComponentSettings>,
}

impl Default for HostOptions {
    fn default() -> Self {
        Self {
            deployment_queue_capacity: 16,
            components: HashMap::new(),
        }
    }
}

/// Local HTTP server options
#[derive(Debug, Clone)]
pub struct ServerOptions {
    /// Host to bind to
    pub host: String,

    /// Port to listen on, 0 for any free port
    pub port: u16,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8090,
        }
    }
}
