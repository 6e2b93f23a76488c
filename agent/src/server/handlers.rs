//! HTTP request handlers

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use cli_models::{
    CreateDebugPasswordRequest, CreateDebugPasswordResponse, CreateLocalDeploymentRequest,
    CreateLocalDeploymentResponse, GetComponentDetailsRequest, GetComponentDetailsResponse,
    GetLocalDeploymentStatusRequest, GetLocalDeploymentStatusResponse, HealthResponse,
    ListComponentsRequest, ListComponentsResponse, ListLocalDeploymentsRequest,
    ListLocalDeploymentsResponse, RestartComponentRequest, RestartComponentResponse,
    StopComponentRequest, StopComponentResponse, UpdateRecipesAndArtifactsRequest,
    UpdateRecipesAndArtifactsResponse, VersionResponse,
};

use crate::cli::CliError;
use crate::server::caller::Caller;
use crate::server::state::ServerState;
use crate::utils::version_info;

type CliResult<T> = Result<Json<T>, CliError>;

fn request_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, CliError> {
    payload
        .map(|Json(request)| request)
        .map_err(|e| CliError::InvalidArguments(e.body_text()))
}

/// Health check handler
pub async fn health_handler() -> impl IntoResponse {
    let version = version_info();
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: version.version,
    })
}

/// Version handler
pub async fn version_handler() -> impl IntoResponse {
    let version = version_info();
    Json(VersionResponse {
        version: version.version,
        git_hash: version.git_hash,
        build_time: version.build_time,
    })
}

// ================================ COMPONENTS ===================================== //

pub async fn get_component_handler(
    State(state): State<Arc<ServerState>>,
    caller: Caller,
    Path(name): Path<String>,
) -> CliResult<GetComponentDetailsResponse> {
    let request = GetComponentDetailsRequest {
        component_name: Some(name),
    };
    state
        .agent
        .get_component_details(caller.identity(), request)
        .map(Json)
}

pub async fn list_components_handler(
    State(state): State<Arc<ServerState>>,
    caller: Caller,
) -> CliResult<ListComponentsResponse> {
    state
        .agent
        .list_components(caller.identity(), ListComponentsRequest::default())
        .map(Json)
}

pub async fn restart_component_handler(
    State(state): State<Arc<ServerState>>,
    caller: Caller,
    Path(name): Path<String>,
) -> CliResult<RestartComponentResponse> {
    let request = RestartComponentRequest {
        component_name: Some(name),
    };
    state
        .agent
        .restart_component(caller.identity(), request)
        .map(Json)
}

pub async fn stop_component_handler(
    State(state): State<Arc<ServerState>>,
    caller: Caller,
    Path(name): Path<String>,
) -> CliResult<StopComponentResponse> {
    let request = StopComponentRequest {
        component_name: Some(name),
    };
    state
        .agent
        .stop_component(caller.identity(), request)
        .map(Json)
}

pub async fn update_recipes_and_artifacts_handler(
    State(state): State<Arc<ServerState>>,
    caller: Caller,
    payload: Result<Json<UpdateRecipesAndArtifactsRequest>, JsonRejection>,
) -> CliResult<UpdateRecipesAndArtifactsResponse> {
    let request = request_body(payload)?;
    state
        .agent
        .update_recipes_and_artifacts(caller.identity(), request)
        .await
        .map(Json)
}

// =============================== DEPLOYMENTS ===================================== //

pub async fn create_deployment_handler(
    State(state): State<Arc<ServerState>>,
    caller: Caller,
    payload: Result<Json<CreateLocalDeploymentRequest>, JsonRejection>,
) -> CliResult<CreateLocalDeploymentResponse> {
    let request = request_body(payload)?;
    state
        .agent
        .create_local_deployment(caller.identity(), request)
        .await
        .map(Json)
}

pub async fn get_deployment_handler(
    State(state): State<Arc<ServerState>>,
    caller: Caller,
    Path(deployment_id): Path<String>,
) -> CliResult<GetLocalDeploymentStatusResponse> {
    let request = GetLocalDeploymentStatusRequest {
        deployment_id: Some(deployment_id),
    };
    state
        .agent
        .get_local_deployment_status(caller.identity(), request)
        .map(Json)
}

pub async fn list_deployments_handler(
    State(state): State<Arc<ServerState>>,
    caller: Caller,
) -> CliResult<ListLocalDeploymentsResponse> {
    state
        .agent
        .list_local_deployments(caller.identity(), ListLocalDeploymentsRequest::default())
        .map(Json)
}

// ================================== DEBUG ======================================== //

pub async fn create_debug_password_handler(
    State(state): State<Arc<ServerState>>,
    caller: Caller,
) -> CliResult<CreateDebugPasswordResponse> {
    state
        .agent
        .create_debug_password(caller.identity(), CreateDebugPasswordRequest::default())
        .map(Json)
}
