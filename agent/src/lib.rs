//! CLI agent library
//!
//! Serves local CLI clients on behalf of an edge device runtime: component
//! inspection and control, local deployments and debug passwords.

pub mod app;
pub mod authn;
pub mod cli;
pub mod errors;
pub mod filesys;
pub mod host;
pub mod logs;
pub mod models;
pub mod server;
pub mod storage;
pub mod utils;
pub mod workers;
