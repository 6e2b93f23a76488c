//! Component operations: details, listing, restart and stop

use std::sync::Arc;

use cli_models::{
    ComponentDetails, GetComponentDetailsRequest, GetComponentDetailsResponse,
    ListComponentsRequest, ListComponentsResponse, RestartComponentRequest,
    RestartComponentResponse, StopComponentRequest, StopComponentResponse,
};
use tracing::{debug, info};

use crate::cli::agent::CliAgent;
use crate::cli::auth::authorize;
use crate::cli::errors::CliError;
use crate::host::config::coerce_string;
use crate::host::registry::{CONFIGURATION_CONFIG_KEY, VERSION_CONFIG_KEY};
use crate::host::ComponentHandle;

/// Build a descriptor from a single config snapshot of the component
fn describe(component: &dyn ComponentHandle) -> ComponentDetails {
    let config = component.service_config();
    ComponentDetails {
        component_name: component.name(),
        version: config
            .get(VERSION_CONFIG_KEY)
            .and_then(coerce_string)
            .unwrap_or_default(),
        state: component.state(),
        configuration: config
            .get(CONFIGURATION_CONFIG_KEY)
            .and_then(|v| v.as_object())
            .cloned()
            .unwrap_or_default(),
    }
}

fn required_name(name: Option<String>) -> Result<String, CliError> {
    match name {
        Some(name) if !name.trim().is_empty() => Ok(name),
        _ => Err(CliError::InvalidArguments(
            "Component name cannot be empty".to_string(),
        )),
    }
}

impl CliAgent {
    fn locate(&self, name: &str) -> Result<Arc<dyn ComponentHandle>, CliError> {
        self.registry.locate(name).map_err(|e| {
            debug!("Component lookup for {} failed: {}", name, e);
            CliError::from(e)
        })
    }

    pub fn get_component_details(
        &self,
        caller: &str,
        request: GetComponentDetailsRequest,
    ) -> Result<GetComponentDetailsResponse, CliError> {
        authorize(caller)?;
        let name = required_name(request.component_name)?;
        let component = self.locate(&name)?;

        Ok(GetComponentDetailsResponse {
            component_details: describe(component.as_ref()),
        })
    }

    pub fn list_components(
        &self,
        caller: &str,
        _request: ListComponentsRequest,
    ) -> Result<ListComponentsResponse, CliError> {
        authorize(caller)?;
        let main = self.registry.main_component_name();

        let components = self
            .registry
            .ordered_dependencies()
            .iter()
            .filter(|c| c.name() != main)
            .map(|c| describe(c.as_ref()))
            .collect();

        Ok(ListComponentsResponse { components })
    }

    pub fn restart_component(
        &self,
        caller: &str,
        request: RestartComponentRequest,
    ) -> Result<RestartComponentResponse, CliError> {
        authorize(caller)?;
        let name = required_name(request.component_name)?;
        let component = self.locate(&name)?;

        info!("Restart of component {} requested by {}", name, caller);
        component.request_restart();
        Ok(RestartComponentResponse {})
    }

    pub fn stop_component(
        &self,
        caller: &str,
        request: StopComponentRequest,
    ) -> Result<StopComponentResponse, CliError> {
        authorize(caller)?;
        let name = required_name(request.component_name)?;
        let component = self.locate(&name)?;

        info!("Stop of component {} requested by {}", name, caller);
        component.request_stop();
        Ok(StopComponentResponse {})
    }
}
