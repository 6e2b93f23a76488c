//! Test doubles for the host contracts

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use cli_agent::cli::{cli_client_id, CliAgent, CliAgentOptions};
use cli_agent::filesys::dir::Dir;
use cli_agent::host::local::{LocalComponentStore, MemoryConfigStore};
use cli_agent::host::{ComponentHandle, DeploymentQueue, HostError, ServiceRegistry};
use cli_agent::models::deployment::Deployment;
use cli_models::LifecycleState;
use serde_json::{json, Map, Value};

pub fn caller() -> String {
    cli_client_id("test")
}

pub struct MockComponent {
    pub name: String,
    pub state: LifecycleState,
    pub config: Map<String, Value>,
    pub restarts: AtomicUsize,
    pub stops: AtomicUsize,
}

impl MockComponent {
    pub fn new(name: &str, version: &str, configuration: Value) -> Arc<Self> {
        let config = match json!({"version": version, "configuration": configuration}) {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Arc::new(Self {
            name: name.to_string(),
            state: LifecycleState::Running,
            config,
            restarts: AtomicUsize::new(0),
            stops: AtomicUsize::new(0),
        })
    }
}

impl ComponentHandle for MockComponent {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn state(&self) -> LifecycleState {
        self.state
    }

    fn service_config(&self) -> Map<String, Value> {
        self.config.clone()
    }

    fn request_restart(&self) {
        self.restarts.fetch_add(1, Ordering::SeqCst);
    }

    fn request_stop(&self) {
        self.stops.fetch_add(1, Ordering::SeqCst);
    }
}

/// Registry over a fixed dependency-ordered list
#[derive(Default)]
pub struct MockRegistry {
    pub components: Vec<Arc<MockComponent>>,
    pub lookups: AtomicUsize,
}

impl MockRegistry {
    pub fn with(components: Vec<Arc<MockComponent>>) -> Arc<Self> {
        Arc::new(Self {
            components,
            lookups: AtomicUsize::new(0),
        })
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl ServiceRegistry for MockRegistry {
    fn locate(&self, name: &str) -> Result<Arc<dyn ComponentHandle>, HostError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.components
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.clone() as Arc<dyn ComponentHandle>)
            .ok_or_else(|| HostError::ServiceNotFound(name.to_string()))
    }

    fn ordered_dependencies(&self) -> Vec<Arc<dyn ComponentHandle>> {
        self.components
            .iter()
            .map(|c| c.clone() as Arc<dyn ComponentHandle>)
            .collect()
    }
}

/// Queue that records offers and accepts or rejects all of them
pub struct RecordingQueue {
    pub accept: bool,
    pub offered: Mutex<Vec<Deployment>>,
}

impl RecordingQueue {
    pub fn accepting() -> Arc<Self> {
        Arc::new(Self {
            accept: true,
            offered: Mutex::new(Vec::new()),
        })
    }

    pub fn rejecting() -> Arc<Self> {
        Arc::new(Self {
            accept: false,
            offered: Mutex::new(Vec::new()),
        })
    }

    pub fn offered(&self) -> Vec<Deployment> {
        self.offered.lock().unwrap().clone()
    }
}

impl DeploymentQueue for RecordingQueue {
    fn offer(&self, deployment: Deployment) -> bool {
        self.offered.lock().unwrap().push(deployment);
        self.accept
    }
}

pub struct Fixture {
    pub agent: CliAgent,
    pub registry: Arc<MockRegistry>,
    pub config: Arc<MemoryConfigStore>,
}

/// Agent over a mock registry and an in-memory config tree
pub fn fixture(components: Vec<Arc<MockComponent>>) -> Fixture {
    let registry = MockRegistry::with(components);
    let config = Arc::new(MemoryConfigStore::new());
    let store = Arc::new(LocalComponentStore::new(Dir::new(
        std::env::temp_dir().join("cli-agent-unused-store"),
    )));
    let agent = CliAgent::new(
        registry.clone(),
        config.clone(),
        store,
        CliAgentOptions::default(),
    );
    Fixture {
        agent,
        registry,
        config,
    }
}

/// Components in dependency order, `main` last
pub fn default_components() -> Vec<Arc<MockComponent>> {
    vec![
        MockComponent::new("A", "1.0.0", json!({"param1": "value1"})),
        MockComponent::new("B", "2.1.0", json!({})),
        MockComponent::new("main", "0.1.0", json!({})),
    ]
}
