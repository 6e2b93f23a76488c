//! Local deployment operations

use std::collections::HashMap;

use chrono::Utc;
use cli_models::{
    CreateLocalDeploymentRequest, CreateLocalDeploymentResponse, DeploymentStatus,
    GetLocalDeploymentStatusRequest, GetLocalDeploymentStatusResponse, ListLocalDeploymentsRequest,
    ListLocalDeploymentsResponse, LocalDeployment,
};
use serde_json::{Map, Value};
use tracing::{debug, error, info, warn};

use crate::cli::agent::CliAgent;
use crate::cli::auth::authorize;
use crate::cli::errors::CliError;
use crate::cli::PERSISTENT_LOCAL_DEPLOYMENTS;
use crate::host::config::{coerce_i64, coerce_string};
use crate::models::deployment::{
    ConfigurationUpdateOperation, Deployment, DeploymentType, LocalDeploymentDetails,
    LocalOverrideRequest, CREATED_ON_KEY_NAME, DEPLOYMENT_STATUS_KEY_NAME,
};
use crate::utils::{generate_uuid, is_uuid};

/// Merge action keys accepted in `component_to_configuration`
const MERGE_ACTION: &str = "MERGE";
const RESET_ACTION: &str = "RESET";

/// Turn `{component: {MERGE: {...}, RESET: [...]}}` into update operations
fn configuration_updates(
    request: HashMap<String, HashMap<String, Value>>,
) -> Result<HashMap<String, ConfigurationUpdateOperation>, CliError> {
    let mut updates = HashMap::with_capacity(request.len());

    for (component, actions) in request {
        let mut update = ConfigurationUpdateOperation::default();
        for (action, value) in actions {
            match action.as_str() {
                MERGE_ACTION => match value {
                    Value::Object(map) => update.value_to_merge = Some(map),
                    Value::Null => {}
                    _ => {
                        return Err(CliError::InvalidArguments(format!(
                            "{} configuration for {} must be an object",
                            MERGE_ACTION, component
                        )))
                    }
                },
                RESET_ACTION => match value {
                    Value::Array(paths) => {
                        let paths = paths
                            .iter()
                            .map(|p| p.as_str().map(str::to_string))
                            .collect::<Option<Vec<_>>>()
                            .ok_or_else(|| {
                                CliError::InvalidArguments(format!(
                                    "{} paths for {} must be strings",
                                    RESET_ACTION, component
                                ))
                            })?;
                        update.paths_to_reset = Some(paths);
                    }
                    Value::Null => {}
                    _ => {
                        return Err(CliError::InvalidArguments(format!(
                            "{} configuration for {} must be a list of paths",
                            RESET_ACTION, component
                        )))
                    }
                },
                other => {
                    return Err(CliError::InvalidArguments(format!(
                        "Unknown configuration action {} for {}",
                        other, component
                    )))
                }
            }
        }
        updates.insert(component, update);
    }

    Ok(updates)
}

/// Decode one persisted status record
fn decode_local_deployment(deployment_id: &str, record: &Value) -> Option<LocalDeployment> {
    let status = record
        .get(DEPLOYMENT_STATUS_KEY_NAME)
        .and_then(coerce_string)?
        .parse::<DeploymentStatus>()
        .ok()?;

    Some(LocalDeployment {
        deployment_id: deployment_id.to_string(),
        status,
        created_on: record.get(CREATED_ON_KEY_NAME).and_then(coerce_i64),
    })
}

/// Compute the record to store given what is already recorded.
///
/// A `QUEUED` update never replaces a later status; it only fills in a
/// missing `CreatedOn`. Later updates keep the recorded `CreatedOn` when
/// they carry none. `None` means the stored record stays as is.
fn merge_status_record(
    existing: Option<&Value>,
    incoming: &Map<String, Value>,
    status: DeploymentStatus,
) -> Option<Map<String, Value>> {
    let existing = existing.and_then(Value::as_object);
    let existing_created_on = existing.and_then(|r| r.get(CREATED_ON_KEY_NAME));

    if status == DeploymentStatus::Queued {
        let recorded_status = existing
            .and_then(|r| r.get(DEPLOYMENT_STATUS_KEY_NAME))
            .and_then(coerce_string)
            .and_then(|s| s.parse::<DeploymentStatus>().ok());
        if let (Some(recorded), Some(existing)) = (recorded_status, existing) {
            if recorded != DeploymentStatus::Queued {
                let created_on = incoming.get(CREATED_ON_KEY_NAME)?;
                if existing_created_on.is_some() {
                    return None;
                }
                let mut kept = existing.clone();
                kept.insert(CREATED_ON_KEY_NAME.to_string(), created_on.clone());
                return Some(kept);
            }
        }
    }

    let mut record = incoming.clone();
    if !record.contains_key(CREATED_ON_KEY_NAME) {
        if let Some(created_on) = existing_created_on {
            record.insert(CREATED_ON_KEY_NAME.to_string(), created_on.clone());
        }
    }
    Some(record)
}

impl CliAgent {
    /// Queue a local deployment and record it as `QUEUED`.
    ///
    /// A failure to persist the status record after a successful enqueue is
    /// reported to the caller but the deployment stays queued.
    pub async fn create_local_deployment(
        &self,
        caller: &str,
        request: CreateLocalDeploymentRequest,
    ) -> Result<CreateLocalDeploymentResponse, CliError> {
        authorize(caller)?;
        let queue = self.deployment_queue()?;

        let request_id = match request.request_id {
            Some(id) if is_uuid(&id) => id,
            Some(id) => {
                return Err(CliError::InvalidArguments(format!(
                    "Deployment id {} is not a valid UUID",
                    id
                )))
            }
            None => generate_uuid(),
        };

        let configuration_update =
            configuration_updates(request.component_to_configuration.unwrap_or_default())?;

        if request.recipe_directory_path.is_some() || request.artifacts_directory_path.is_some() {
            self.copy_recipes_and_artifacts(
                request.recipe_directory_path.as_deref(),
                request.artifacts_directory_path.as_deref(),
            )
            .await?;
        }

        let now = Utc::now();
        let override_request = LocalOverrideRequest {
            request_id: request_id.clone(),
            request_timestamp: now.timestamp_millis(),
            group_name: request.group_name,
            components_to_merge: request.root_component_versions_to_add.unwrap_or_default(),
            components_to_remove: request.root_components_to_remove.unwrap_or_default(),
            configuration_update,
            recipe_directory_path: request.recipe_directory_path,
            artifacts_directory_path: request.artifacts_directory_path,
        };

        let document = serde_json::to_string(&override_request).map_err(|e| {
            error!("Failed to serialize local deployment {}: {}", request_id, e);
            CliError::ServiceError(format!("Failed to serialize deployment document: {}", e))
        })?;

        if !queue.offer(Deployment::local(request_id.clone(), document)) {
            error!("Deployment queue rejected local deployment {}", request_id);
            return Err(CliError::ServiceError(format!(
                "Failed to submit local deployment {}",
                request_id
            )));
        }
        info!("Submitted local deployment {} for {}", request_id, caller);

        self.persist_local_deployment(&LocalDeploymentDetails {
            deployment_id: request_id.clone(),
            deployment_type: DeploymentType::Local,
            status: DeploymentStatus::Queued,
            created_on: Some(now.timestamp_millis()),
        })?;

        Ok(CreateLocalDeploymentResponse {
            deployment_id: request_id,
        })
    }

    /// Upsert the status record of a local deployment.
    ///
    /// Also the callback the host invokes whenever a local deployment changes
    /// status. Non-local deployments are ignored.
    pub fn persist_local_deployment(&self, details: &LocalDeploymentDetails) -> Result<(), CliError> {
        if details.deployment_type != DeploymentType::Local {
            debug!(
                "Ignoring status of non-local deployment {}",
                details.deployment_id
            );
            return Ok(());
        }

        let record = details
            .to_config_map()
            .map_err(|e| CliError::ServiceError(e.to_string()))?;

        let written = self
            .config
            .update(
                &[PERSISTENT_LOCAL_DEPLOYMENTS, details.deployment_id.as_str()],
                &mut |existing| merge_status_record(existing, &record, details.status),
            )
            .map_err(|e| {
                error!(
                    "Failed to persist status of local deployment {}: {}",
                    details.deployment_id, e
                );
                CliError::from(e)
            })?;

        if !written {
            debug!(
                "Local deployment {} already past {}, keeping recorded status",
                details.deployment_id, details.status
            );
            return Ok(());
        }

        debug!(
            "Local deployment {} is now {}",
            details.deployment_id, details.status
        );
        Ok(())
    }

    pub fn get_local_deployment_status(
        &self,
        caller: &str,
        request: GetLocalDeploymentStatusRequest,
    ) -> Result<GetLocalDeploymentStatusResponse, CliError> {
        authorize(caller)?;

        let deployment_id = match request.deployment_id {
            Some(id) if is_uuid(&id) => id,
            _ => {
                return Err(CliError::InvalidArguments(
                    "Deployment id must be a valid UUID".to_string(),
                ))
            }
        };

        let record = self
            .config
            .find(&[PERSISTENT_LOCAL_DEPLOYMENTS, deployment_id.as_str()])
            .ok_or_else(|| {
                CliError::ResourceNotFound(format!("Local deployment {} not found", deployment_id))
            })?;

        let deployment = decode_local_deployment(&deployment_id, &record).ok_or_else(|| {
            CliError::ServiceError(format!(
                "Local deployment {} has no readable status",
                deployment_id
            ))
        })?;

        Ok(GetLocalDeploymentStatusResponse { deployment })
    }

    pub fn list_local_deployments(
        &self,
        caller: &str,
        _request: ListLocalDeploymentsRequest,
    ) -> Result<ListLocalDeploymentsResponse, CliError> {
        authorize(caller)?;

        let local_deployments = match self.config.find(&[PERSISTENT_LOCAL_DEPLOYMENTS]) {
            Some(Value::Object(records)) => records
                .iter()
                .filter_map(|(id, record)| {
                    let decoded = decode_local_deployment(id, record);
                    if decoded.is_none() {
                        warn!("Skipping local deployment {} with unreadable status", id);
                    }
                    decoded
                })
                .collect(),
            _ => Vec::new(),
        };

        Ok(ListLocalDeploymentsResponse { local_deployments })
    }
}
