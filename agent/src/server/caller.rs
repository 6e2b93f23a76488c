//! Caller identity extraction

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use tracing::debug;

use crate::cli::{authorize, CliError};
use crate::server::state::ServerState;

const BEARER_PREFIX: &str = "Bearer ";

/// Identity of the CLI client behind a request.
///
/// Resolved from the bearer token the client read from its IPC info file.
/// Requests without a known token are rejected before the body is parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller(pub String);

impl Caller {
    pub fn identity(&self) -> &str {
        &self.0
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

impl FromRequestParts<Arc<ServerState>> for Caller {
    type Rejection = CliError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ServerState>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or_else(|| {
            debug!("Request to {} without a bearer token", parts.uri.path());
            CliError::Unauthorized("Missing CLI auth token".to_string())
        })?;

        let identity = state
            .client_tokens
            .resolve(token)
            .ok_or_else(|| CliError::Unauthorized("Unknown CLI auth token".to_string()))?;
        authorize(&identity)?;

        Ok(Caller(identity))
    }
}
