//! Authentication helpers

pub mod client_token;
pub mod fingerprint;
