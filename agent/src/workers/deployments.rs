//! Deployment intake worker for the standalone host

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use anyhow::Context;
use cli_models::DeploymentStatus;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::cli::CliAgent;
use crate::host::local::LocalRegistry;
use crate::models::deployment::{
    Deployment, DeploymentType, LocalDeploymentDetails, LocalOverrideRequest,
};

/// Apply one deployment and return its terminal status
fn apply_deployment(registry: &LocalRegistry, deployment: &Deployment) -> DeploymentStatus {
    let result = serde_json::from_str::<LocalOverrideRequest>(&deployment.deployment_document)
        .context("Invalid local deployment document")
        .and_then(|request| registry.apply(&request).context("Failed to apply deployment"));

    match result {
        Ok(()) => DeploymentStatus::Succeeded,
        Err(e) => {
            error!("Local deployment {} failed: {:#}", deployment.id, e);
            DeploymentStatus::Failed
        }
    }
}

fn report(agent: &CliAgent, deployment: &Deployment, status: DeploymentStatus) {
    let details = LocalDeploymentDetails {
        deployment_id: deployment.id.clone(),
        deployment_type: deployment.deployment_type,
        status,
        created_on: None,
    };
    if let Err(e) = agent.persist_local_deployment(&details) {
        warn!(
            "Failed to record status {} of deployment {}: {}",
            status, deployment.id, e
        );
    }
}

/// Process one deployment taken off the queue
pub fn process(agent: &CliAgent, registry: &LocalRegistry, deployment: &Deployment) -> DeploymentStatus {
    if deployment.deployment_type != DeploymentType::Local {
        debug!("Skipping non-local deployment {}", deployment.id);
        return DeploymentStatus::Canceled;
    }

    info!("Processing local deployment {}", deployment.id);
    report(agent, deployment, DeploymentStatus::InProgress);
    let status = apply_deployment(registry, deployment);
    report(agent, deployment, status);
    info!("Local deployment {} finished as {}", deployment.id, status);
    status
}

/// Run the deployment intake worker until shutdown or the queue closes
pub async fn run(
    agent: Arc<CliAgent>,
    registry: Arc<LocalRegistry>,
    mut deployments: mpsc::Receiver<Deployment>,
    mut shutdown_signal: Pin<Box<dyn Future<Output = ()> + Send>>,
) {
    info!("Deployment worker starting...");

    loop {
        tokio::select! {
            _ = &mut shutdown_signal => {
                info!("Deployment worker shutting down...");
                return;
            }
            next = deployments.recv() => match next {
                Some(deployment) => {
                    process(&agent, &registry, &deployment);
                }
                None => {
                    info!("Deployment queue closed, stopping deployment worker");
                    return;
                }
            },
        }
    }
}
