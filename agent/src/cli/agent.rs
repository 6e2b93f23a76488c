//! CLI agent state

use std::sync::{Arc, RwLock};
use std::time::Duration;

use tracing::info;

use crate::cli::errors::CliError;
use crate::cli::DEPLOYMENTS_QUEUE_NOT_INITIALIZED;
use crate::host::{ComponentStore, ConfigStore, DeploymentQueue, ServiceRegistry};

/// CLI agent options
#[derive(Debug, Clone)]
pub struct CliAgentOptions {
    /// How long an issued debug password stays valid
    pub debug_password_validity: Duration,
}

impl Default for CliAgentOptions {
    fn default() -> Self {
        Self {
            debug_password_validity: Duration::from_secs(8 * 60 * 60), // 8 hours
        }
    }
}

/// Handles every CLI operation against the host collaborators.
///
/// Shared across request tasks behind an `Arc`; all host state is reached
/// through the trait objects, so handlers never hold locks across calls.
pub struct CliAgent {
    pub(crate) registry: Arc<dyn ServiceRegistry>,
    pub(crate) config: Arc<dyn ConfigStore>,
    pub(crate) component_store: Arc<dyn ComponentStore>,
    deployment_queue: RwLock<Option<Arc<dyn DeploymentQueue>>>,
    pub(crate) options: CliAgentOptions,
}

impl CliAgent {
    /// Create an agent. The deployment queue is attached later with
    /// [`CliAgent::set_deployment_queue`] once the host has one.
    pub fn new(
        registry: Arc<dyn ServiceRegistry>,
        config: Arc<dyn ConfigStore>,
        component_store: Arc<dyn ComponentStore>,
        options: CliAgentOptions,
    ) -> Self {
        Self {
            registry,
            config,
            component_store,
            deployment_queue: RwLock::new(None),
            options,
        }
    }

    /// Attach or detach the host's deployment queue
    pub fn set_deployment_queue(&self, queue: Option<Arc<dyn DeploymentQueue>>) {
        info!(attached = queue.is_some(), "Updating deployment queue");
        let mut current = self.deployment_queue.write().unwrap_or_else(|e| e.into_inner());
        *current = queue;
    }

    pub(crate) fn deployment_queue(&self) -> Result<Arc<dyn DeploymentQueue>, CliError> {
        let current = self.deployment_queue.read().unwrap_or_else(|e| e.into_inner());
        current
            .clone()
            .ok_or_else(|| CliError::ServiceError(DEPLOYMENTS_QUEUE_NOT_INITIALIZED.to_string()))
    }
}
