//! Auth tokens for local CLI clients

use std::collections::HashMap;
use std::sync::RwLock;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::info;

use crate::cli::auth::cli_client_id;
use crate::errors::AgentError;
use crate::filesys::dir::Dir;
use crate::filesys::file::File;
use crate::utils::random_url_safe;

/// Random bytes per client token
const CLIENT_TOKEN_BYTES: usize = 32;

/// A token issued to one CLI client
#[derive(Debug, Clone)]
pub struct ClientToken {
    pub client_id: String,
    pub identity: String,
    pub token: SecretString,
}

/// Contents of the IPC info file a CLI client reads to connect
#[derive(Serialize)]
struct IpcInfo<'a> {
    cli_auth_token: &'a str,
    address: &'a str,
}

/// Maps bearer tokens to caller identities
#[derive(Default)]
pub struct ClientTokenStore {
    tokens: RwLock<HashMap<String, String>>,
}

impl ClientTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a fresh token for `client_id`, revoking any earlier one
    pub fn issue(&self, client_id: &str) -> ClientToken {
        let identity = cli_client_id(client_id);
        let token = random_url_safe(CLIENT_TOKEN_BYTES);

        let mut tokens = self.tokens.write().unwrap_or_else(|e| e.into_inner());
        tokens.retain(|_, existing| existing != &identity);
        tokens.insert(token.clone(), identity.clone());

        ClientToken {
            client_id: client_id.to_string(),
            identity,
            token: SecretString::from(token),
        }
    }

    /// Identity the token was issued to, if any
    pub fn resolve(&self, token: &str) -> Option<String> {
        let tokens = self.tokens.read().unwrap_or_else(|e| e.into_inner());
        tokens.get(token).cloned()
    }

    pub fn len(&self) -> usize {
        self.tokens.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Write the IPC info file for a client, readable by the owner only
pub async fn write_ipc_info(
    dir: &Dir,
    token: &ClientToken,
    address: &str,
) -> Result<File, AgentError> {
    let file = dir.file(&token.client_id);
    file.write_private_json(&IpcInfo {
        cli_auth_token: token.token.expose_secret(),
        address,
    })
    .await?;
    info!(
        "Wrote IPC info for CLI client {} to {}",
        token.client_id,
        file.path().display()
    );
    Ok(file)
}
