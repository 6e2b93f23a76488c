//! Standalone host used when the agent runs without an external runtime.
//!
//! These types implement the host contracts with in-process state so the
//! request layer can be served and exercised end to end.

pub mod component_store;
pub mod config;
pub mod lifecycle;
pub mod queue;
pub mod registry;

pub use component_store::LocalComponentStore;
pub use config::MemoryConfigStore;
pub use queue::ChannelDeploymentQueue;
pub use registry::{LocalComponent, LocalRegistry};
