use {
    alloy::{
        network::ReceiptResponse,
        primitives::{Address, TxHash},
    },
    futures::{FutureExt, future::BoxFuture},
    std::fmt::{self, Debug, Formatter},
};

#[derive(Debug, thiserror::Error)]
pub enum DeploymentError {
    #[error("constructor expects {expected} arguments but none were provided")]
    MissingConstructorArguments { expected: usize },
    #[error("failed to submit deployment transaction")]
    Submission(#[source] anyhow::Error),
    #[error("failed to confirm deployment transaction {tx_hash}")]
    Confirmation {
        tx_hash: TxHash,
        #[source]
        source: anyhow::Error,
    },
    #[error("deployment transaction {0} reverted")]
    Reverted(TxHash),
    #[error("transaction {0} did not create a contract")]
    NotADeployment(TxHash),
}

/// A contract instance that is live on chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deployment {
    pub address: Address,
    pub transaction_hash: TxHash,
    pub block_number: Option<u64>,
    pub gas_used: u64,
}

impl Deployment {
    /// Extracts the deployment from the receipt of a contract creation
    /// transaction.
    pub fn from_receipt(receipt: &impl ReceiptResponse) -> Result<Self, DeploymentError> {
        let transaction_hash = receipt.transaction_hash();
        if !receipt.status() {
            return Err(DeploymentError::Reverted(transaction_hash));
        }
        let address = receipt
            .contract_address()
            .ok_or(DeploymentError::NotADeployment(transaction_hash))?;
        Ok(Self {
            address,
            transaction_hash,
            block_number: receipt.block_number(),
            gas_used: receipt.gas_used(),
        })
    }
}

/// A contract instance whose creation transaction was accepted by the node
/// but which is not necessarily live yet.
pub struct DeploymentHandle {
    transaction_hash: TxHash,
    confirmation: BoxFuture<'static, Result<Deployment, DeploymentError>>,
}

impl DeploymentHandle {
    pub fn new(
        transaction_hash: TxHash,
        confirmation: impl Future<Output = Result<Deployment, DeploymentError>> + Send + 'static,
    ) -> Self {
        Self {
            transaction_hash,
            confirmation: confirmation.boxed(),
        }
    }

    pub fn transaction_hash(&self) -> TxHash {
        self.transaction_hash
    }

    /// Waits until the instance is live and returns where it lives.
    pub async fn deployed(self) -> Result<Deployment, DeploymentError> {
        self.confirmation.await
    }
}

impl Debug for DeploymentHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeploymentHandle")
            .field("transaction_hash", &self.transaction_hash)
            .finish_non_exhaustive()
    }
}
