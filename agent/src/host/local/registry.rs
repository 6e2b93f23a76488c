//! Service registry for the standalone host

use std::sync::{Arc, Mutex, RwLock};

use cli_models::LifecycleState;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::host::local::lifecycle::{ComponentFsm, LifecycleEvent};
use crate::host::registry::{
    ComponentHandle, ServiceRegistry, CONFIGURATION_CONFIG_KEY, MAIN_SERVICE_NAME,
    VERSION_CONFIG_KEY,
};
use crate::host::HostError;
use crate::models::deployment::{ConfigurationUpdateOperation, LocalOverrideRequest};

/// A component known to the local host
#[derive(Debug)]
pub struct LocalComponent {
    name: String,
    fsm: Mutex<ComponentFsm>,
    config: RwLock<Map<String, Value>>,
}

impl LocalComponent {
    /// Create an installed, running component
    pub fn running(name: &str, version: &str, configuration: Map<String, Value>) -> Self {
        let mut fsm = ComponentFsm::default();
        for event in [LifecycleEvent::Install, LifecycleEvent::Start, LifecycleEvent::Started] {
            // Fresh FSM, these transitions are always valid
            let _ = fsm.process(event);
        }

        let mut config = Map::new();
        config.insert(VERSION_CONFIG_KEY.to_string(), Value::String(version.to_string()));
        config.insert(CONFIGURATION_CONFIG_KEY.to_string(), Value::Object(configuration));

        Self {
            name: name.to_string(),
            fsm: Mutex::new(fsm),
            config: RwLock::new(config),
        }
    }

    fn transition(&self, events: &[LifecycleEvent]) {
        let mut fsm = self.fsm.lock().unwrap_or_else(|e| e.into_inner());
        for event in events {
            if let Err(e) = fsm.process(event.clone()) {
                debug!("Component {}: {}", self.name, e);
            }
        }
    }

    fn set_version(&self, version: &str) {
        let mut config = self.config.write().unwrap_or_else(|e| e.into_inner());
        config.insert(VERSION_CONFIG_KEY.to_string(), Value::String(version.to_string()));
    }

    fn update_configuration(&self, update: &ConfigurationUpdateOperation) {
        let mut config = self.config.write().unwrap_or_else(|e| e.into_inner());
        let configuration = config
            .entry(CONFIGURATION_CONFIG_KEY.to_string())
            .or_insert_with(|| Value::Object(Map::new()));

        for path in update.paths_to_reset.iter().flatten() {
            reset_path(configuration, path);
        }
        if let Some(merge) = &update.value_to_merge {
            merge_value(configuration, &Value::Object(merge.clone()));
        }
    }
}

impl ComponentHandle for LocalComponent {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn state(&self) -> LifecycleState {
        self.fsm.lock().unwrap_or_else(|e| e.into_inner()).state()
    }

    fn service_config(&self) -> Map<String, Value> {
        self.config.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn request_restart(&self) {
        info!("Restart requested for component {}", self.name);
        self.transition(&[LifecycleEvent::Restart, LifecycleEvent::Started]);
    }

    fn request_stop(&self) {
        info!("Stop requested for component {}", self.name);
        self.transition(&[LifecycleEvent::Stop, LifecycleEvent::Stopped]);
    }
}

/// Deep-merge `patch` into `target`; objects merge key by key, anything else overwrites
fn merge_value(target: &mut Value, patch: &Value) {
    match (target, patch) {
        (Value::Object(target), Value::Object(patch)) => {
            for (key, value) in patch {
                match target.get_mut(key) {
                    Some(existing) => merge_value(existing, value),
                    None => {
                        target.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (target, patch) => *target = patch.clone(),
    }
}

/// Remove the node at a `/`-separated path. An empty path clears everything.
fn reset_path(target: &mut Value, path: &str) {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let Some((last, parents)) = segments.split_last() else {
        *target = Value::Object(Map::new());
        return;
    };
    let mut node = target;
    for segment in parents {
        node = match node.get_mut(*segment) {
            Some(child) => child,
            None => return,
        };
    }
    if let Some(map) = node.as_object_mut() {
        map.remove(*last);
    }
}

/// Registry holding components in dependency order, `main` always last
pub struct LocalRegistry {
    components: RwLock<Vec<Arc<LocalComponent>>>,
}

impl LocalRegistry {
    pub fn new() -> Self {
        Self {
            components: RwLock::new(vec![Arc::new(LocalComponent::running(
                MAIN_SERVICE_NAME,
                env!("CARGO_PKG_VERSION"),
                Map::new(),
            ))]),
        }
    }

    /// Register a component ahead of `main`. Replaces any component of the same name.
    pub fn register(&self, component: LocalComponent) {
        let mut components = self.components.write().unwrap_or_else(|e| e.into_inner());
        components.retain(|c| c.name != component.name);
        let position = components
            .iter()
            .position(|c| c.name == MAIN_SERVICE_NAME)
            .unwrap_or(components.len());
        components.insert(position, Arc::new(component));
    }

    /// Drop a component. `main` cannot be removed.
    pub fn deregister(&self, name: &str) -> bool {
        if name == MAIN_SERVICE_NAME {
            return false;
        }
        let mut components = self.components.write().unwrap_or_else(|e| e.into_inner());
        let before = components.len();
        components.retain(|c| c.name != name);
        components.len() != before
    }

    fn find(&self, name: &str) -> Option<Arc<LocalComponent>> {
        let components = self.components.read().unwrap_or_else(|e| e.into_inner());
        components.iter().find(|c| c.name == name).cloned()
    }

    /// Apply a local deployment document to the registry
    pub fn apply(&self, request: &LocalOverrideRequest) -> Result<(), HostError> {
        for name in &request.components_to_remove {
            if name == MAIN_SERVICE_NAME {
                return Err(HostError::Config(format!("Cannot remove {}", MAIN_SERVICE_NAME)));
            }
        }

        for (name, version) in &request.components_to_merge {
            match self.find(name) {
                Some(existing) => {
                    existing.set_version(version);
                    existing.request_restart();
                }
                None => {
                    info!("Adding component {} version {}", name, version);
                    self.register(LocalComponent::running(name, version, Map::new()));
                }
            }
        }

        for (name, update) in &request.configuration_update {
            match self.find(name) {
                Some(component) => component.update_configuration(update),
                None => warn!("Configuration update for unknown component {}", name),
            }
        }

        for name in &request.components_to_remove {
            if let Some(component) = self.find(name) {
                component.request_stop();
                self.deregister(name);
                info!("Removed component {}", name);
            }
        }

        Ok(())
    }
}

impl Default for LocalRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceRegistry for LocalRegistry {
    fn locate(&self, name: &str) -> Result<Arc<dyn ComponentHandle>, HostError> {
        self.find(name)
            .map(|c| c as Arc<dyn ComponentHandle>)
            .ok_or_else(|| HostError::ServiceNotFound(name.to_string()))
    }

    fn ordered_dependencies(&self) -> Vec<Arc<dyn ComponentHandle>> {
        let components = self.components.read().unwrap_or_else(|e| e.into_inner());
        components
            .iter()
            .map(|c| c.clone() as Arc<dyn ComponentHandle>)
            .collect()
    }
}
