//! Local deployment tests

use std::collections::HashMap;

use cli_agent::cli::{CliError, DEPLOYMENTS_QUEUE_NOT_INITIALIZED, PERSISTENT_LOCAL_DEPLOYMENTS};
use cli_agent::filesys::dir::Dir;
use cli_agent::host::ConfigStore;
use cli_agent::models::deployment::{
    DeploymentType, LocalDeploymentDetails, LocalOverrideRequest,
};
use cli_agent::utils::generate_uuid;
use cli_models::{
    CreateLocalDeploymentRequest, DeploymentStatus, GetLocalDeploymentStatusRequest,
    ListLocalDeploymentsRequest, UpdateRecipesAndArtifactsRequest,
};
use serde_json::json;

use crate::mocks::{caller, default_components, fixture, RecordingQueue};

fn populated_request() -> CreateLocalDeploymentRequest {
    let configuration = HashMap::from([(
        "A".to_string(),
        HashMap::from([("MERGE".to_string(), json!({"param1": "value2"}))]),
    )]);
    CreateLocalDeploymentRequest {
        group_name: Some("thinggroup".to_string()),
        root_component_versions_to_add: Some(HashMap::from([(
            "A".to_string(),
            "1.0.1".to_string(),
        )])),
        root_components_to_remove: Some(vec!["B".to_string()]),
        component_to_configuration: Some(configuration),
        ..Default::default()
    }
}

fn status_request(id: &str) -> GetLocalDeploymentStatusRequest {
    GetLocalDeploymentStatusRequest {
        deployment_id: Some(id.to_string()),
    }
}

#[tokio::test]
async fn test_create_without_queue() {
    let f = fixture(default_components());

    let result = f
        .agent
        .create_local_deployment(&caller(), populated_request())
        .await;
    assert_eq!(
        result.unwrap_err(),
        CliError::ServiceError(DEPLOYMENTS_QUEUE_NOT_INITIALIZED.to_string())
    );
    assert!(f.config.find(&[PERSISTENT_LOCAL_DEPLOYMENTS]).is_none());
}

#[tokio::test]
async fn test_create_unauthorized() {
    let f = fixture(default_components());
    let queue = RecordingQueue::accepting();
    f.agent.set_deployment_queue(Some(queue.clone()));

    let result = f
        .agent
        .create_local_deployment("TestService", populated_request())
        .await;
    assert!(matches!(result, Err(CliError::Unauthorized(_))));
    assert!(queue.offered().is_empty());
}

#[tokio::test]
async fn test_create_round_trip() {
    let f = fixture(default_components());
    let queue = RecordingQueue::accepting();
    f.agent.set_deployment_queue(Some(queue.clone()));

    let response = f
        .agent
        .create_local_deployment(&caller(), populated_request())
        .await
        .unwrap();
    let id = response.deployment_id;

    let offered = queue.offered();
    assert_eq!(offered.len(), 1);
    assert_eq!(offered[0].id, id);
    assert_eq!(offered[0].deployment_type, DeploymentType::Local);

    let document: LocalOverrideRequest =
        serde_json::from_str(&offered[0].deployment_document).unwrap();
    assert_eq!(document.request_id, id);
    assert_eq!(document.group_name.as_deref(), Some("thinggroup"));
    assert_eq!(document.components_to_merge["A"], "1.0.1");
    assert_eq!(document.components_to_remove, vec!["B".to_string()]);
    let merge = document.configuration_update["A"]
        .value_to_merge
        .as_ref()
        .unwrap();
    assert_eq!(merge["param1"], "value2");

    let record = f
        .config
        .find(&[PERSISTENT_LOCAL_DEPLOYMENTS, id.as_str()])
        .unwrap();
    assert_eq!(record["DeploymentType"], "LOCAL");
    assert_eq!(record["DeploymentStatus"], "QUEUED");
    assert_eq!(record["DeploymentId"], id.as_str());
}

#[tokio::test]
async fn test_create_echoes_request_id() {
    let f = fixture(default_components());
    f.agent
        .set_deployment_queue(Some(RecordingQueue::accepting()));

    let id = generate_uuid();
    let request = CreateLocalDeploymentRequest {
        request_id: Some(id.clone()),
        ..Default::default()
    };
    let response = f
        .agent
        .create_local_deployment(&caller(), request)
        .await
        .unwrap();
    assert_eq!(response.deployment_id, id);

    let request = CreateLocalDeploymentRequest {
        request_id: Some("not-a-uuid".to_string()),
        ..Default::default()
    };
    let result = f.agent.create_local_deployment(&caller(), request).await;
    assert!(matches!(result, Err(CliError::InvalidArguments(_))));
}

#[tokio::test]
async fn test_create_rejected_by_queue() {
    let f = fixture(default_components());
    let queue = RecordingQueue::rejecting();
    f.agent.set_deployment_queue(Some(queue.clone()));

    let result = f
        .agent
        .create_local_deployment(&caller(), populated_request())
        .await;
    assert!(matches!(result, Err(CliError::ServiceError(_))));
    assert_eq!(queue.offered().len(), 1);
    assert!(f.config.find(&[PERSISTENT_LOCAL_DEPLOYMENTS]).is_none());
}

#[tokio::test]
async fn test_create_with_unknown_merge_action() {
    let f = fixture(default_components());
    let queue = RecordingQueue::accepting();
    f.agent.set_deployment_queue(Some(queue.clone()));

    let request = CreateLocalDeploymentRequest {
        component_to_configuration: Some(HashMap::from([(
            "A".to_string(),
            HashMap::from([("REPLACE".to_string(), json!({}))]),
        )])),
        ..Default::default()
    };
    let result = f.agent.create_local_deployment(&caller(), request).await;
    assert!(matches!(result, Err(CliError::InvalidArguments(_))));
    assert!(queue.offered().is_empty());
}

#[test]
fn test_get_status_validation() {
    let f = fixture(default_components());

    for id in ["", "InvalidId", "1234"] {
        let result = f.agent.get_local_deployment_status(&caller(), status_request(id));
        assert!(matches!(result, Err(CliError::InvalidArguments(_))));
    }
    let result = f.agent.get_local_deployment_status(
        &caller(),
        GetLocalDeploymentStatusRequest { deployment_id: None },
    );
    assert!(matches!(result, Err(CliError::InvalidArguments(_))));

    let result = f
        .agent
        .get_local_deployment_status(&caller(), status_request(&generate_uuid()));
    assert!(matches!(result, Err(CliError::ResourceNotFound(_))));
}

#[test]
fn test_get_status_of_persisted_deployment() {
    let f = fixture(default_components());
    let id = generate_uuid();
    f.agent
        .persist_local_deployment(&LocalDeploymentDetails {
            deployment_id: id.clone(),
            deployment_type: DeploymentType::Local,
            status: DeploymentStatus::InProgress,
            created_on: Some(1_700_000_000_000),
        })
        .unwrap();

    let response = f
        .agent
        .get_local_deployment_status(&caller(), status_request(&id))
        .unwrap();
    assert_eq!(response.deployment.deployment_id, id);
    assert_eq!(response.deployment.status, DeploymentStatus::InProgress);
    assert_eq!(response.deployment.created_on, Some(1_700_000_000_000));
}

#[test]
fn test_status_update_keeps_created_on() {
    let f = fixture(default_components());
    let id = generate_uuid();
    let mut details = LocalDeploymentDetails {
        deployment_id: id.clone(),
        deployment_type: DeploymentType::Local,
        status: DeploymentStatus::Queued,
        created_on: Some(42),
    };
    f.agent.persist_local_deployment(&details).unwrap();

    details.status = DeploymentStatus::Succeeded;
    details.created_on = None;
    f.agent.persist_local_deployment(&details).unwrap();

    let deployment = f
        .agent
        .get_local_deployment_status(&caller(), status_request(&id))
        .unwrap()
        .deployment;
    assert_eq!(deployment.status, DeploymentStatus::Succeeded);
    assert_eq!(deployment.created_on, Some(42));
}

#[test]
fn test_non_local_status_ignored() {
    let f = fixture(default_components());
    f.agent
        .persist_local_deployment(&LocalDeploymentDetails {
            deployment_id: generate_uuid(),
            deployment_type: DeploymentType::IotJobs,
            status: DeploymentStatus::Queued,
            created_on: None,
        })
        .unwrap();
    assert!(f.config.find(&[PERSISTENT_LOCAL_DEPLOYMENTS]).is_none());
}

#[test]
fn test_list_empty_namespace() {
    let f = fixture(default_components());
    let response = f
        .agent
        .list_local_deployments(&caller(), ListLocalDeploymentsRequest::default())
        .unwrap();
    assert!(response.local_deployments.is_empty());
}

#[test]
fn test_list_persisted_deployments() {
    let f = fixture(default_components());
    let statuses = [
        DeploymentStatus::Queued,
        DeploymentStatus::InProgress,
        DeploymentStatus::Succeeded,
        DeploymentStatus::Failed,
    ];
    let mut expected = HashMap::new();
    for status in statuses {
        let id = generate_uuid();
        f.agent
            .persist_local_deployment(&LocalDeploymentDetails {
                deployment_id: id.clone(),
                deployment_type: DeploymentType::Local,
                status,
                created_on: None,
            })
            .unwrap();
        expected.insert(id, status);
    }

    let response = f
        .agent
        .list_local_deployments(&caller(), ListLocalDeploymentsRequest::default())
        .unwrap();
    let listed: HashMap<_, _> = response
        .local_deployments
        .into_iter()
        .map(|d| (d.deployment_id, d.status))
        .collect();
    assert_eq!(listed, expected);
}

#[test]
fn test_list_skips_unreadable_records() {
    let f = fixture(default_components());
    f.config
        .write(
            &[PERSISTENT_LOCAL_DEPLOYMENTS, "broken"],
            json!({"DeploymentStatus": "EXPLODED"}),
        )
        .unwrap();
    let id = generate_uuid();
    f.agent
        .persist_local_deployment(&LocalDeploymentDetails {
            deployment_id: id.clone(),
            deployment_type: DeploymentType::Local,
            status: DeploymentStatus::Queued,
            created_on: None,
        })
        .unwrap();

    let response = f
        .agent
        .list_local_deployments(&caller(), ListLocalDeploymentsRequest::default())
        .unwrap();
    assert_eq!(response.local_deployments.len(), 1);
    assert_eq!(response.local_deployments[0].deployment_id, id);
}

#[tokio::test]
async fn test_update_recipes_requires_a_directory() {
    let f = fixture(default_components());
    let result = f
        .agent
        .update_recipes_and_artifacts(&caller(), UpdateRecipesAndArtifactsRequest::default())
        .await;
    assert!(matches!(result, Err(CliError::InvalidArguments(_))));

    let request = UpdateRecipesAndArtifactsRequest {
        recipe_directory_path: Some("/nonexistent/cli-agent-recipes".to_string()),
        artifacts_directory_path: None,
    };
    let result = f.agent.update_recipes_and_artifacts(&caller(), request).await;
    assert!(matches!(result, Err(CliError::InvalidArguments(_))));
}

#[tokio::test]
async fn test_create_copies_recipes() {
    use std::sync::Arc;

    use cli_agent::cli::{CliAgent, CliAgentOptions};
    use cli_agent::host::local::{LocalComponentStore, MemoryConfigStore};

    use crate::mocks::MockRegistry;

    let root = Dir::create_temp_dir("cli-agent-recipes").await.unwrap();
    let recipes = root.subdir("recipes-in");
    recipes.file("A-1.0.1.yaml").write_string("name: A").await.unwrap();
    let store = LocalComponentStore::new(root.subdir("store"));

    let agent = CliAgent::new(
        MockRegistry::with(default_components()),
        Arc::new(MemoryConfigStore::new()),
        Arc::new(store.clone()),
        CliAgentOptions::default(),
    );
    agent.set_deployment_queue(Some(RecordingQueue::accepting()));

    let request = CreateLocalDeploymentRequest {
        recipe_directory_path: Some(recipes.path().display().to_string()),
        ..populated_request()
    };
    agent.create_local_deployment(&caller(), request).await.unwrap();

    let saved = store.recipes_dir().file("A-1.0.1.yaml");
    assert_eq!(saved.read_string().await.unwrap(), "name: A");

    root.delete().await.unwrap();
}
