//! Component store contract (recipes and artifacts)

use std::path::PathBuf;

use async_trait::async_trait;

use crate::host::HostError;

#[async_trait]
pub trait ComponentStore: Send + Sync {
    /// Save a recipe file into the store under `file_name`
    async fn save_recipe(&self, file_name: &str, contents: &str) -> Result<(), HostError>;

    /// Directory that local artifacts are copied into
    fn artifact_root(&self) -> PathBuf;
}
