use {
    contracts::{Deployment, DeploymentError, ResolutionError, Toolchain},
    std::{
        fmt::{self, Display, Formatter},
        io::Write,
    },
};

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
    #[error(transparent)]
    Deployment(#[from] DeploymentError),
}

/// A successfully deployed contract instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployed {
    pub contract: String,
    pub deployment: Deployment,
}

impl Display for Deployed {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} deployed to: {}",
            self.contract, self.deployment.address
        )
    }
}

/// Deploys a single new instance of `contract` and waits until it is live.
///
/// Every call creates a new instance, repeated calls never reuse an existing
/// deployment.
pub async fn run(toolchain: &impl Toolchain, contract: &str) -> Result<Deployed, Error> {
    let factory = toolchain.contract_factory(contract).await?;
    let handle = factory.deploy().await?;
    tracing::info!(
        tx_hash = ?handle.transaction_hash(),
        "waiting for deployment confirmation"
    );
    let deployment = handle.deployed().await?;
    tracing::info!(
        address = ?deployment.address,
        block = ?deployment.block_number,
        gas_used = deployment.gas_used,
        "contract deployed"
    );

    Ok(Deployed {
        contract: factory.name(),
        deployment,
    })
}

/// Runs the deployment and reports the outcome. On success the only thing
/// written to `stdout` is the deployed line. On failure the whole error chain
/// goes to `stderr`. Returns the process exit code.
pub async fn execute(
    toolchain: &impl Toolchain,
    contract: &str,
    stdout: &mut impl Write,
    stderr: &mut impl Write,
) -> u8 {
    let result = match run(toolchain, contract).await {
        Ok(deployed) => writeln!(stdout, "{deployed}")
            .and_then(|()| stdout.flush())
            .map_err(|err| anyhow::Error::new(err).context("failed to write to stdout")),
        Err(err) => Err(err.into()),
    };

    match result {
        Ok(()) => EXIT_SUCCESS,
        Err(err) => {
            // Nothing else can be done if stderr is gone as well.
            let _ = writeln!(stderr, "{err:?}");
            EXIT_FAILURE
        }
    }
}
