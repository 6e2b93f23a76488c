//! Integration tests for the CLI agent

mod mocks;
mod test_components;
mod test_debug;
mod test_deployments;
