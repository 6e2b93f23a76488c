//! Server state

use std::sync::Arc;

use crate::authn::client_token::ClientTokenStore;
use crate::cli::CliAgent;

/// Server state shared across handlers
pub struct ServerState {
    pub agent: Arc<CliAgent>,
    pub client_tokens: Arc<ClientTokenStore>,
}

impl ServerState {
    pub fn new(agent: Arc<CliAgent>, client_tokens: Arc<ClientTokenStore>) -> Self {
        Self {
            agent,
            client_tokens,
        }
    }
}
