pub mod arguments;
mod run;

pub use run::{Deployed, EXIT_FAILURE, EXIT_SUCCESS, Error, execute, run};
use {
    arguments::Arguments,
    clap::Parser,
    contracts::{Artifacts, Confirmation, HardhatToolchain},
    std::process::ExitCode,
};

pub async fn start(args: impl Iterator<Item = String>) -> ExitCode {
    let args = Arguments::parse_from(args);
    observe::tracing::initialize(&observe::Config::new(
        &args.log_filter,
        args.use_json_logs,
    ));
    observe::panic_hook::install();
    tracing::info!("running deployer with validated arguments:\n{}", args);

    let toolchain = match toolchain(&args) {
        Ok(toolchain) => toolchain,
        Err(err) => {
            eprintln!("{err:?}");
            return ExitCode::from(EXIT_FAILURE);
        }
    };
    let code = execute(
        &toolchain,
        &args.contract,
        &mut std::io::stdout(),
        &mut std::io::stderr(),
    )
    .await;
    ExitCode::from(code)
}

fn toolchain(args: &Arguments) -> anyhow::Result<HardhatToolchain> {
    let signer = ethrpc::alloy::signer(
        args.private_key.as_deref(),
        &args.mnemonic,
        args.account_index,
    )?;
    let deployer = signer.address();
    tracing::info!(?deployer, node = %args.node_url, "using deployer account");

    Ok(HardhatToolchain::new(
        Artifacts::new(&args.artifacts),
        ethrpc::alloy::provider_with_signer(&args.node_url, signer),
        deployer,
        Confirmation {
            confirmations: args.confirmations,
            timeout: args.confirmation_timeout,
        },
    ))
}
