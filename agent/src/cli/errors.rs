//! Typed errors returned to CLI clients

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use cli_models::ErrorResponse;
use thiserror::Error;

use crate::host::HostError;

/// One error kind per failure class a CLI client can act on
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    #[error("Service error: {0}")]
    ServiceError(String),
}

impl CliError {
    pub fn kind(&self) -> &'static str {
        match self {
            CliError::Unauthorized(_) => "Unauthorized",
            CliError::InvalidArguments(_) => "InvalidArguments",
            CliError::ResourceNotFound(_) => "ResourceNotFound",
            CliError::ServiceError(_) => "ServiceError",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            CliError::Unauthorized(m)
            | CliError::InvalidArguments(m)
            | CliError::ResourceNotFound(m)
            | CliError::ServiceError(m) => m,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            CliError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            CliError::InvalidArguments(_) => StatusCode::BAD_REQUEST,
            CliError::ResourceNotFound(_) => StatusCode::NOT_FOUND,
            CliError::ServiceError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<HostError> for CliError {
    fn from(err: HostError) -> Self {
        match err {
            HostError::ServiceNotFound(name) => {
                CliError::ResourceNotFound(format!("Component {} not found", name))
            }
            other => CliError::ServiceError(other.to_string()),
        }
    }
}

impl IntoResponse for CliError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.kind().to_string(),
            message: self.message().to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
