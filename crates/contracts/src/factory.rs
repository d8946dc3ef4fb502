use {
    crate::{
        artifact::{Artifacts, ResolutionError},
        deployment::{Deployment, DeploymentError, DeploymentHandle},
    },
    alloy::{
        network::TransactionBuilder,
        primitives::{Address, Bytes},
        providers::{DynProvider, Provider},
        rpc::types::TransactionRequest,
    },
    std::time::Duration,
};

/// Provides deployable contracts by name.
#[cfg_attr(any(test, feature = "test-util"), mockall::automock)]
#[async_trait::async_trait]
pub trait Toolchain: Send + Sync {
    /// Returns a factory for the contract `name`, either a bare contract name
    /// or a fully qualified `sourceName:contractName`.
    async fn contract_factory(
        &self,
        name: &str,
    ) -> Result<Box<dyn ContractFactory>, ResolutionError>;
}

/// Builds and submits contract creation transactions for one compiled
/// contract.
#[cfg_attr(any(test, feature = "test-util"), mockall::automock)]
#[async_trait::async_trait]
pub trait ContractFactory: Send + Sync {
    /// Name of the contract this factory deploys.
    fn name(&self) -> String;

    /// Submits the creation transaction of a new instance without constructor
    /// arguments. Returns once the node accepted the transaction.
    async fn deploy(&self) -> Result<DeploymentHandle, DeploymentError>;
}

/// When a deployment counts as confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Confirmation {
    /// Number of blocks including and on top of the one with the creation
    /// transaction.
    pub confirmations: u64,
    /// Give up waiting after this long. `None` waits forever.
    pub timeout: Option<Duration>,
}

impl Default for Confirmation {
    fn default() -> Self {
        Self {
            confirmations: 1,
            timeout: None,
        }
    }
}

/// Deploys contracts compiled by Hardhat through an alloy provider.
pub struct HardhatToolchain {
    artifacts: Artifacts,
    provider: DynProvider,
    deployer: Address,
    confirmation: Confirmation,
}

impl HardhatToolchain {
    /// `provider` must be able to sign transactions for `deployer`.
    pub fn new(
        artifacts: Artifacts,
        provider: DynProvider,
        deployer: Address,
        confirmation: Confirmation,
    ) -> Self {
        Self {
            artifacts,
            provider,
            deployer,
            confirmation,
        }
    }
}

#[async_trait::async_trait]
impl Toolchain for HardhatToolchain {
    async fn contract_factory(
        &self,
        name: &str,
    ) -> Result<Box<dyn ContractFactory>, ResolutionError> {
        let artifact = self.artifacts.resolve(name)?;
        let code = artifact.creation_code()?;
        tracing::debug!(
            contract = artifact.fully_qualified_name(),
            code_size = code.len(),
            "resolved contract artifact"
        );

        Ok(Box::new(AlloyFactory {
            name: artifact.contract_name.clone(),
            constructor_inputs: artifact.constructor_inputs(),
            code,
            provider: self.provider.clone(),
            deployer: self.deployer,
            confirmation: self.confirmation,
        }))
    }
}

struct AlloyFactory {
    name: String,
    constructor_inputs: usize,
    code: Bytes,
    provider: DynProvider,
    deployer: Address,
    confirmation: Confirmation,
}

#[async_trait::async_trait]
impl ContractFactory for AlloyFactory {
    fn name(&self) -> String {
        self.name.clone()
    }

    async fn deploy(&self) -> Result<DeploymentHandle, DeploymentError> {
        if self.constructor_inputs > 0 {
            return Err(DeploymentError::MissingConstructorArguments {
                expected: self.constructor_inputs,
            });
        }

        let tx = TransactionRequest::default()
            .with_from(self.deployer)
            .with_deploy_code(self.code.clone());
        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|err| DeploymentError::Submission(err.into()))?
            .with_required_confirmations(self.confirmation.confirmations)
            .with_timeout(self.confirmation.timeout);

        let tx_hash = *pending.tx_hash();
        tracing::info!(contract = self.name, ?tx_hash, deployer = ?self.deployer, "submitted deployment");

        Ok(DeploymentHandle::new(tx_hash, async move {
            let receipt = pending
                .get_receipt()
                .await
                .map_err(|err| DeploymentError::Confirmation {
                    tx_hash,
                    source: err.into(),
                })?;
            let deployment = Deployment::from_receipt(&receipt)?;
            tracing::debug!(?deployment, "deployment confirmed");
            Ok(deployment)
        }))
    }
}
