//! Directory-backed component store

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use crate::filesys::dir::Dir;
use crate::host::{ComponentStore, HostError};

/// Keeps recipes and artifacts under a single root directory
#[derive(Debug, Clone)]
pub struct LocalComponentStore {
    root: Dir,
}

impl LocalComponentStore {
    pub fn new(root: Dir) -> Self {
        Self { root }
    }

    pub fn recipes_dir(&self) -> Dir {
        self.root.subdir("recipes")
    }

    pub fn artifacts_dir(&self) -> Dir {
        self.root.subdir("artifacts")
    }
}

#[async_trait]
impl ComponentStore for LocalComponentStore {
    async fn save_recipe(&self, file_name: &str, contents: &str) -> Result<(), HostError> {
        let file = self.recipes_dir().file(file_name);
        debug!("Saving recipe to {}", file.path().display());
        file.write_string(contents)
            .await
            .map_err(|e| HostError::ComponentStore(e.to_string()))
    }

    fn artifact_root(&self) -> PathBuf {
        self.artifacts_dir().path().to_path_buf()
    }
}
