use {
    std::{
        fmt::{self, Display, Formatter},
        path::PathBuf,
        time::Duration,
    },
    url::Url,
};

#[derive(clap::Parser)]
#[cfg_attr(test, derive(Debug))]
pub struct Arguments {
    /// The log filter.
    #[clap(
        long,
        env,
        default_value = "warn,deployer=info,contracts=info,ethrpc=info"
    )]
    pub log_filter: String,

    /// Whether to use JSON format for the logs.
    #[clap(long, env, default_value = "false")]
    pub use_json_logs: bool,

    /// The Ethereum node URL to connect to.
    #[clap(long, env, default_value = "http://localhost:8545")]
    pub node_url: Url,

    /// Hex encoded private key of the deploying account. Takes precedence
    /// over the mnemonic.
    #[clap(long, env)]
    pub private_key: Option<String>,

    /// BIP-39 mnemonic the deploying account is derived from. Defaults to the
    /// mnemonic of the pre-funded accounts of local development nodes.
    #[clap(long, env, default_value = ethrpc::alloy::DEV_MNEMONIC)]
    pub mnemonic: String,

    /// Derivation index of the deploying account within the mnemonic.
    #[clap(long, env, default_value = "0")]
    pub account_index: u32,

    /// Directory containing the Hardhat build artifacts.
    #[clap(long, env, default_value = "artifacts")]
    pub artifacts: PathBuf,

    /// Contract to deploy, either a bare name or a fully qualified
    /// `sourceName:contractName`.
    #[clap(long, env, default_value = "Leozuki")]
    pub contract: String,

    /// Number of blocks (including the one with the creation transaction)
    /// to wait for before the deployment counts as confirmed.
    #[clap(
        long,
        env,
        default_value = "1",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub confirmations: u64,

    /// Stop waiting for the confirmation after this long. Waits forever if
    /// unset.
    #[clap(long, env, value_parser = humantime::parse_duration)]
    pub confirmation_timeout: Option<Duration>,
}

impl Display for Arguments {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self {
            log_filter,
            use_json_logs,
            node_url,
            private_key,
            mnemonic: _,
            account_index,
            artifacts,
            contract,
            confirmations,
            confirmation_timeout,
        } = self;

        writeln!(f, "log_filter: {log_filter}")?;
        writeln!(f, "use_json_logs: {use_json_logs}")?;
        writeln!(f, "node_url: {node_url}")?;
        writeln!(
            f,
            "private_key: {}",
            private_key.as_ref().map(|_| "SECRET").unwrap_or("None")
        )?;
        writeln!(f, "mnemonic: SECRET")?;
        writeln!(f, "account_index: {account_index}")?;
        writeln!(f, "artifacts: {}", artifacts.display())?;
        writeln!(f, "contract: {contract}")?;
        writeln!(f, "confirmations: {confirmations}")?;
        writeln!(f, "confirmation_timeout: {confirmation_timeout:?}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use {super::*, clap::Parser};

    #[test]
    fn runs_without_flags() {
        let args = Arguments::try_parse_from(["deployer"]).unwrap();
        assert_eq!(args.contract, "Leozuki");
        assert_eq!(args.artifacts, PathBuf::from("artifacts"));
        assert_eq!(args.confirmations, 1);
        assert_eq!(args.confirmation_timeout, None);
    }

    #[test]
    fn parses_overrides() {
        let args = Arguments::try_parse_from([
            "deployer",
            "--node-url",
            "http://node:8545",
            "--contract",
            "contracts/Leozuki.sol:Leozuki",
            "--confirmations",
            "3",
            "--confirmation-timeout",
            "2m",
        ])
        .unwrap();
        assert_eq!(args.node_url.as_str(), "http://node:8545/");
        assert_eq!(args.contract, "contracts/Leozuki.sol:Leozuki");
        assert_eq!(args.confirmations, 3);
        assert_eq!(args.confirmation_timeout, Some(Duration::from_secs(120)));
    }

    #[test]
    fn rejects_zero_confirmations() {
        let err = Arguments::try_parse_from(["deployer", "--confirmations", "0"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn display_hides_secrets() {
        let args = Arguments::try_parse_from([
            "deployer",
            "--private-key",
            "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
        ])
        .unwrap();
        let printed = args.to_string();
        assert!(printed.contains("private_key: SECRET"));
        assert!(printed.contains("mnemonic: SECRET"));
        assert!(!printed.contains("ac0974bec39a17e3"));
        assert!(!printed.contains("junk"));
    }
}
