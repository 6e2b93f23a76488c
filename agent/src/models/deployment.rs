//! Deployment models

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use cli_models::DeploymentStatus;
use serde::{Deserialize, Serialize};

/// Config key of the deployment id inside a status record
pub const DEPLOYMENT_ID_KEY_NAME: &str = "DeploymentId";

/// Config key of the deployment status inside a status record
pub const DEPLOYMENT_STATUS_KEY_NAME: &str = "DeploymentStatus";

/// Config key of the deployment type inside a status record
pub const DEPLOYMENT_TYPE_KEY_NAME: &str = "DeploymentType";

/// Config key of the creation timestamp inside a status record
pub const CREATED_ON_KEY_NAME: &str = "CreatedOn";

/// Where a deployment came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeploymentType {
    IotJobs,
    Local,
    Shadow,
}

/// A deployment handed to the host's submission queue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deployment {
    /// Unique deployment ID
    pub id: String,

    pub deployment_type: DeploymentType,

    /// Serialized [`LocalOverrideRequest`] for local deployments
    pub deployment_document: String,

    pub created_at: DateTime<Utc>,
}

impl Deployment {
    pub fn local(id: String, document: String) -> Self {
        Self {
            id,
            deployment_type: DeploymentType::Local,
            deployment_document: document,
            created_at: Utc::now(),
        }
    }
}

/// Configuration change for one component
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationUpdateOperation {
    /// Values deep-merged into the component configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_to_merge: Option<serde_json::Map<String, serde_json::Value>>,

    /// JSON-pointer style paths reset to their defaults before merging
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paths_to_reset: Option<Vec<String>>,
}

/// The document of a local deployment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalOverrideRequest {
    pub request_id: String,

    /// Epoch millis at which the request was accepted
    pub request_timestamp: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,

    /// Root components to add or update, name to version
    #[serde(default)]
    pub components_to_merge: HashMap<String, String>,

    #[serde(default)]
    pub components_to_remove: Vec<String>,

    #[serde(default)]
    pub configuration_update: HashMap<String, ConfigurationUpdateOperation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe_directory_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifacts_directory_path: Option<String>,
}

/// Status record persisted for every local deployment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalDeploymentDetails {
    #[serde(rename = "DeploymentId")]
    pub deployment_id: String,

    #[serde(rename = "DeploymentType")]
    pub deployment_type: DeploymentType,

    #[serde(rename = "DeploymentStatus")]
    pub status: DeploymentStatus,

    #[serde(rename = "CreatedOn", default, skip_serializing_if = "Option::is_none")]
    pub created_on: Option<i64>,
}

impl LocalDeploymentDetails {
    /// Render as the map stored under the deployment's config node
    pub fn to_config_map(&self) -> Result<serde_json::Map<String, serde_json::Value>, serde_json::Error> {
        match serde_json::to_value(self)? {
            serde_json::Value::Object(map) => Ok(map),
            _ => Ok(serde_json::Map::new()),
        }
    }
}
