//! Application state management

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::app::options::AppOptions;
use crate::authn::client_token::{write_ipc_info, ClientTokenStore};
use crate::authn::fingerprint::{fingerprint_pem_file, record_fingerprints};
use crate::cli::CliAgent;
use crate::errors::AgentError;
use crate::filesys::dir::Dir;
use crate::filesys::file::File;
use crate::host::local::{
    ChannelDeploymentQueue, LocalComponent, LocalComponentStore, LocalRegistry, MemoryConfigStore,
};
use crate::models::deployment::Deployment;

/// Main application state
pub struct AppState {
    /// Request layer served to CLI clients
    pub agent: Arc<CliAgent>,

    /// Standalone host registry, also driven by the deployment worker
    pub registry: Arc<LocalRegistry>,

    pub config: Arc<MemoryConfigStore>,

    pub client_tokens: Arc<ClientTokenStore>,

    ipc_info_dir: Dir,
    ipc_info_files: Mutex<Vec<File>>,
}

impl AppState {
    /// Initialize application state.
    ///
    /// Returns the receiving end of the deployment queue for the intake worker.
    pub async fn init(
        options: &AppOptions,
    ) -> Result<(Self, mpsc::Receiver<Deployment>), AgentError> {
        info!("Initializing application state...");
        options.layout.setup().await?;

        let config = Arc::new(MemoryConfigStore::new());

        let registry = Arc::new(LocalRegistry::new());
        for (name, component) in &options.host.components {
            registry.register(LocalComponent::running(
                name,
                &component.version,
                component.configuration.clone(),
            ));
        }
        info!("Registered {} components", options.host.components.len());

        let component_store = Arc::new(LocalComponentStore::new(
            options.layout.component_store_dir(),
        ));

        let agent = Arc::new(CliAgent::new(
            registry.clone(),
            config.clone(),
            component_store,
            options.cli.clone(),
        ));

        let (queue, deployments) =
            ChannelDeploymentQueue::channel(options.host.deployment_queue_capacity);
        agent.set_deployment_queue(Some(Arc::new(queue)));

        if let Some(path) = &options.debug_certificate_path {
            let cert_file = File::new(path);
            match fingerprint_pem_file(&cert_file).await {
                Ok(fingerprints) => record_fingerprints(config.as_ref(), &fingerprints)?,
                Err(e) => warn!(
                    "Unable to fingerprint certificate {}: {}",
                    path.display(),
                    e
                ),
            }
        }

        let state = Self {
            agent,
            registry,
            config,
            client_tokens: Arc::new(ClientTokenStore::new()),
            ipc_info_dir: options.layout.ipc_info_dir(),
            ipc_info_files: Mutex::new(Vec::new()),
        };

        Ok((state, deployments))
    }

    /// Issue a token to each client and write its IPC info file
    pub async fn issue_client_tokens(
        &self,
        clients: &[String],
        address: &str,
    ) -> Result<(), AgentError> {
        for client_id in clients {
            let token = self.client_tokens.issue(client_id);
            let file = write_ipc_info(&self.ipc_info_dir, &token, address).await?;
            self.ipc_info_files
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .push(file);
        }
        Ok(())
    }

    /// Shutdown application state
    pub async fn shutdown(&self) -> Result<(), AgentError> {
        info!("Shutting down application state...");
        self.agent.set_deployment_queue(None);

        let files = std::mem::take(&mut *self.ipc_info_files.lock().unwrap_or_else(|e| e.into_inner()));
        for file in files {
            if let Err(e) = file.delete().await {
                warn!("Failed to remove IPC info {}: {}", file.path().display(), e);
            }
        }
        Ok(())
    }
}
