//! Authorization gate for CLI callers

use tracing::warn;

use crate::cli::errors::CliError;

/// Identity prefix carried by every CLI client connection
pub const CLI_CLIENT_ID_PREFIX: &str = "edge-cli#";

/// Identity assigned to the CLI client `client_id`
pub fn cli_client_id(client_id: &str) -> String {
    format!("{}{}", CLI_CLIENT_ID_PREFIX, client_id)
}

/// Accept only identities issued to CLI clients
pub fn authorize(caller: &str) -> Result<(), CliError> {
    match caller.strip_prefix(CLI_CLIENT_ID_PREFIX) {
        Some(suffix) if !suffix.is_empty() => Ok(()),
        _ => {
            warn!(caller, "Rejecting CLI request from unauthorized caller");
            Err(CliError::Unauthorized(
                "Caller is not authorized to use the CLI API".to_string(),
            ))
        }
    }
}
