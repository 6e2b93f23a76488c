//! Wire models shared between the edge CLI agent and its command-line clients.

pub mod models;

pub use models::*;
