//! In-memory configuration store

use std::sync::RwLock;

use serde_json::{Map, Value};

use crate::host::{ConfigStore, HostError};

/// Configuration tree kept in memory behind a single lock
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    root: RwLock<Map<String, Value>>,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the whole tree
    pub fn snapshot(&self) -> Map<String, Value> {
        let root = self.root.read().unwrap_or_else(|e| e.into_inner());
        root.clone()
    }
}

/// Walk to the parent of the last path segment, creating objects on the way
fn parent_mut<'a>(
    root: &'a mut Map<String, Value>,
    path: &[&str],
) -> Result<&'a mut Map<String, Value>, HostError> {
    let mut node = root;
    for segment in &path[..path.len().saturating_sub(1)] {
        let child = node
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        node = match child {
            Value::Object(map) => map,
            _ => {
                return Err(HostError::Config(format!(
                    "Path segment '{}' of {:?} is a leaf",
                    segment, path
                )))
            }
        };
    }
    Ok(node)
}

fn last_segment<'a>(path: &[&'a str]) -> Result<&'a str, HostError> {
    path.last()
        .copied()
        .ok_or_else(|| HostError::Config("Empty config path".to_string()))
}

impl ConfigStore for MemoryConfigStore {
    fn find(&self, path: &[&str]) -> Option<Value> {
        let root = self.root.read().unwrap_or_else(|e| e.into_inner());
        let (first, rest) = match path.split_first() {
            Some(split) => split,
            None => return Some(Value::Object(root.clone())),
        };
        let mut node = root.get(*first)?;
        for segment in rest {
            node = node.as_object()?.get(*segment)?;
        }
        Some(node.clone())
    }

    fn replace(&self, path: &[&str], value: Map<String, Value>) -> Result<(), HostError> {
        self.write(path, Value::Object(value))
    }

    fn write(&self, path: &[&str], value: Value) -> Result<(), HostError> {
        let key = last_segment(path)?;
        let mut root = self.root.write().unwrap_or_else(|e| e.into_inner());
        let parent = parent_mut(&mut root, path)?;
        parent.insert(key.to_string(), value);
        Ok(())
    }

    fn update(
        &self,
        path: &[&str],
        f: &mut dyn FnMut(Option<&Value>) -> Option<Map<String, Value>>,
    ) -> Result<bool, HostError> {
        let key = last_segment(path)?;
        let mut root = self.root.write().unwrap_or_else(|e| e.into_inner());
        let parent = parent_mut(&mut root, path)?;
        match f(parent.get(key)) {
            Some(value) => {
                parent.insert(key.to_string(), Value::Object(value));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn remove(&self, path: &[&str]) -> Result<bool, HostError> {
        let key = last_segment(path)?;
        let mut root = self.root.write().unwrap_or_else(|e| e.into_inner());
        let mut node = &mut *root;
        for segment in &path[..path.len() - 1] {
            node = match node.get_mut(*segment) {
                Some(Value::Object(map)) => map,
                _ => return Ok(false),
            };
        }
        Ok(node.remove(key).is_some())
    }
}
