//! HTTP server setup

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::app::options::ServerOptions;
use crate::errors::AgentError;
use crate::server::handlers::{
    create_debug_password_handler, create_deployment_handler, get_component_handler,
    get_deployment_handler, health_handler, list_components_handler, list_deployments_handler,
    restart_component_handler, stop_component_handler, update_recipes_and_artifacts_handler,
    version_handler,
};
use crate::server::state::ServerState;

/// Build the CLI router
pub fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        // Health and version
        .route("/health", get(health_handler))
        .route("/version", get(version_handler))
        // Components
        .route("/cli/components", get(list_components_handler))
        .route("/cli/components/{name}", get(get_component_handler))
        .route("/cli/components/{name}/restart", post(restart_component_handler))
        .route("/cli/components/{name}/stop", post(stop_component_handler))
        .route(
            "/cli/recipes-and-artifacts",
            post(update_recipes_and_artifacts_handler),
        )
        // Local deployments
        .route(
            "/cli/deployments",
            get(list_deployments_handler).post(create_deployment_handler),
        )
        .route("/cli/deployments/{id}", get(get_deployment_handler))
        // Debug
        .route("/cli/debug-password", post(create_debug_password_handler))
        // State and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// A running server and the address it is bound to
pub struct ServerHandle {
    pub local_addr: SocketAddr,
    pub handle: JoinHandle<Result<(), AgentError>>,
}

/// Start the HTTP server
pub async fn serve(
    options: &ServerOptions,
    state: Arc<ServerState>,
    shutdown_signal: impl Future<Output = ()> + Send + 'static,
) -> Result<ServerHandle, AgentError> {
    let app = router(state);

    let addr = format!("{}:{}", options.host, options.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AgentError::ServerError(format!("Failed to bind {}: {}", addr, e)))?;
    let local_addr = listener
        .local_addr()
        .map_err(|e| AgentError::ServerError(e.to_string()))?;
    info!("CLI server listening on {}", local_addr);

    let handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
            .map_err(|e| AgentError::ServerError(e.to_string()))
    });

    Ok(ServerHandle { local_addr, handle })
}
