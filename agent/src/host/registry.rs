//! Service registry contract

use std::sync::Arc;

use cli_models::LifecycleState;

use crate::host::HostError;

/// Name of the orchestration component that owns every other component
pub const MAIN_SERVICE_NAME: &str = "main";

/// Config key holding a component's version
pub const VERSION_CONFIG_KEY: &str = "version";

/// Config sub-tree holding a component's user configuration
pub const CONFIGURATION_CONFIG_KEY: &str = "configuration";

/// A component instance managed by the host
pub trait ComponentHandle: Send + Sync {
    fn name(&self) -> String;

    fn state(&self) -> LifecycleState;

    /// Point-in-time copy of the component's service configuration
    fn service_config(&self) -> serde_json::Map<String, serde_json::Value>;

    /// Ask the host to restart the component. Returns once the request is accepted.
    fn request_restart(&self);

    /// Ask the host to stop the component. Returns once the request is accepted.
    fn request_stop(&self);
}

/// Lookup and enumeration of host components
pub trait ServiceRegistry: Send + Sync {
    /// Resolve a component by name, failing with [`HostError::ServiceNotFound`]
    fn locate(&self, name: &str) -> Result<Arc<dyn ComponentHandle>, HostError>;

    /// Every registered component, dependencies first
    fn ordered_dependencies(&self) -> Vec<Arc<dyn ComponentHandle>>;

    fn main_component_name(&self) -> String {
        MAIN_SERVICE_NAME.to_string()
    }
}
