//! Copying local recipes and artifacts into the component store

use std::path::Path;

use cli_models::{UpdateRecipesAndArtifactsRequest, UpdateRecipesAndArtifactsResponse};
use tracing::{error, info};

use crate::cli::agent::CliAgent;
use crate::cli::auth::authorize;
use crate::cli::errors::CliError;
use crate::filesys::dir::Dir;
use crate::filesys::file::File;

fn non_empty(path: Option<&str>) -> Option<&str> {
    path.map(str::trim).filter(|p| !p.is_empty())
}

impl CliAgent {
    pub async fn update_recipes_and_artifacts(
        &self,
        caller: &str,
        request: UpdateRecipesAndArtifactsRequest,
    ) -> Result<UpdateRecipesAndArtifactsResponse, CliError> {
        authorize(caller)?;
        self.copy_recipes_and_artifacts(
            request.recipe_directory_path.as_deref(),
            request.artifacts_directory_path.as_deref(),
        )
        .await?;
        Ok(UpdateRecipesAndArtifactsResponse {})
    }

    /// Copy recipes and/or artifacts; at least one directory must be given
    pub(crate) async fn copy_recipes_and_artifacts(
        &self,
        recipe_dir: Option<&str>,
        artifacts_dir: Option<&str>,
    ) -> Result<(), CliError> {
        let recipe_dir = non_empty(recipe_dir);
        let artifacts_dir = non_empty(artifacts_dir);
        if recipe_dir.is_none() && artifacts_dir.is_none() {
            return Err(CliError::InvalidArguments(
                "Need recipe or artifacts directory path".to_string(),
            ));
        }

        if let Some(dir) = recipe_dir {
            self.copy_recipes(Dir::new(dir)).await?;
        }
        if let Some(dir) = artifacts_dir {
            self.copy_artifacts(Dir::new(dir)).await?;
        }
        Ok(())
    }

    async fn copy_recipes(&self, dir: Dir) -> Result<(), CliError> {
        let invalid = |e: &dyn std::fmt::Display| {
            error!("Failed to read recipes from {}: {}", dir.path().display(), e);
            CliError::InvalidArguments(format!(
                "Invalid recipe directory path {}: {}",
                dir.path().display(),
                e
            ))
        };

        let files = dir.list_files().await.map_err(|e| invalid(&e))?;
        for path in &files {
            let file_name = match path.file_name().and_then(|n| n.to_str()) {
                Some(name) => name,
                None => continue,
            };
            let contents = File::new(path).read_string().await.map_err(|e| invalid(&e))?;
            self.component_store.save_recipe(file_name, &contents).await?;
        }

        info!("Copied {} recipes from {}", files.len(), dir.path().display());
        Ok(())
    }

    async fn copy_artifacts(&self, dir: Dir) -> Result<(), CliError> {
        let root = self.component_store.artifact_root();
        let copied = dir.copy_into(Path::new(&root)).await.map_err(|e| {
            error!("Failed to copy artifacts from {}: {}", dir.path().display(), e);
            CliError::InvalidArguments(format!(
                "Invalid artifacts directory path {}: {}",
                dir.path().display(),
                e
            ))
        })?;

        info!("Copied {} artifacts from {}", copied, dir.path().display());
        Ok(())
    }
}
