//! Contracts with the host runtime.
//!
//! The CLI agent never touches host internals directly. Everything it needs
//! from the lifecycle manager, the deployment pipeline and the configuration
//! tree goes through the traits in this module.

pub mod component_store;
pub mod config;
pub mod local;
pub mod queue;
pub mod registry;

use thiserror::Error;

pub use component_store::ComponentStore;
pub use config::ConfigStore;
pub use queue::DeploymentQueue;
pub use registry::{ComponentHandle, ServiceRegistry};

/// Errors raised by host collaborators
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    #[error("Service not found: {0}")]
    ServiceNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Component store error: {0}")]
    ComponentStore(String),
}
