//! Everything needed to turn compiled Hardhat artifacts into live contract
//! instances.
pub mod artifact;
pub mod deployment;
pub mod factory;

#[cfg(any(test, feature = "test-util"))]
pub use factory::{MockContractFactory, MockToolchain};
pub use {
    artifact::{Artifact, Artifacts, ResolutionError},
    deployment::{Deployment, DeploymentError, DeploymentHandle},
    factory::{Confirmation, ContractFactory, HardhatToolchain, Toolchain},
};
