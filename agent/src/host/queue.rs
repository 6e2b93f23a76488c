//! Deployment submission queue contract

use crate::models::deployment::Deployment;

pub trait DeploymentQueue: Send + Sync {
    /// Offer a deployment without blocking. `false` means the queue rejected it.
    fn offer(&self, deployment: Deployment) -> bool;
}
