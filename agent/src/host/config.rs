//! Key-path addressed configuration store contract

use serde_json::{Map, Value};

use crate::host::HostError;

/// Hierarchical key/value store owned by the host.
///
/// Paths address nodes from the root of the namespace handed to the agent,
/// e.g. `["_localDeployments", "<id>", "DeploymentStatus"]`. Every read
/// returns an owned snapshot, every write is atomic for the addressed node.
pub trait ConfigStore: Send + Sync {
    /// Value at `path` (leaf or subtree), `None` when absent
    fn find(&self, path: &[&str]) -> Option<Value>;

    /// Replace the subtree at `path`, creating missing parents
    fn replace(&self, path: &[&str], value: Map<String, Value>) -> Result<(), HostError>;

    /// Set a single leaf at `path`, creating missing parents
    fn write(&self, path: &[&str], value: Value) -> Result<(), HostError>;

    /// Read-modify-write the subtree at `path` as one operation.
    ///
    /// `f` sees the current node and returns the replacement, or `None` to
    /// leave the store untouched. Returns whether a write happened.
    fn update(
        &self,
        path: &[&str],
        f: &mut dyn FnMut(Option<&Value>) -> Option<Map<String, Value>>,
    ) -> Result<bool, HostError>;

    /// Remove the node at `path`. Returns whether anything was removed.
    fn remove(&self, path: &[&str]) -> Result<bool, HostError>;
}

/// Read a config value as a string the way the host coerces scalars
pub fn coerce_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Read a config value as epoch millis
pub fn coerce_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}
