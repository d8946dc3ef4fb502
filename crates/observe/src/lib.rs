//! This crate contains the code required to observe the deployer: logging
//! initialization and the panic hook that routes panics through `tracing`.
pub mod config;
pub mod panic_hook;
pub mod tracing;

pub use config::Config;
