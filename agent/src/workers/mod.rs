//! Background workers

pub mod deployments;
