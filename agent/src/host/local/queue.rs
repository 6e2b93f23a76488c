//! Bounded deployment queue backed by a tokio channel

use tokio::sync::mpsc;
use tracing::warn;

use crate::host::DeploymentQueue;
use crate::models::deployment::Deployment;

/// Producer side of the deployment queue
#[derive(Debug, Clone)]
pub struct ChannelDeploymentQueue {
    tx: mpsc::Sender<Deployment>,
}

impl ChannelDeploymentQueue {
    /// Create a queue holding at most `capacity` pending deployments
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<Deployment>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx }, rx)
    }
}

impl DeploymentQueue for ChannelDeploymentQueue {
    fn offer(&self, deployment: Deployment) -> bool {
        match self.tx.try_send(deployment) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(d)) => {
                warn!("Deployment queue full, rejecting deployment {}", d.id);
                false
            }
            Err(mpsc::error::TrySendError::Closed(d)) => {
                warn!("Deployment queue closed, rejecting deployment {}", d.id);
                false
            }
        }
    }
}
