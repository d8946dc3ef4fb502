use {
    alloy::signers::local::{MnemonicBuilder, PrivateKeySigner, coins_bip39::English},
    anyhow::{Context, Result},
};

/// Mnemonic of the pre-funded accounts of local development nodes (Hardhat
/// network, anvil).
pub const DEV_MNEMONIC: &str = "test test test test test test test test test test test junk";

/// Builds the signer used for submitting transactions.
///
/// An explicit private key always wins over the mnemonic.
pub fn signer(private_key: Option<&str>, mnemonic: &str, index: u32) -> Result<PrivateKeySigner> {
    if let Some(key) = private_key {
        return key.trim().parse().context("invalid private key");
    }

    MnemonicBuilder::<English>::default()
        .phrase(mnemonic)
        .index(index)
        .and_then(|builder| builder.build())
        .with_context(|| format!("failed to derive account {index} from mnemonic"))
}

#[cfg(test)]
mod tests {
    use {super::*, alloy::primitives::address};

    #[test]
    fn derives_dev_accounts() {
        let first = signer(None, DEV_MNEMONIC, 0).unwrap();
        assert_eq!(
            first.address(),
            address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266")
        );

        let second = signer(None, DEV_MNEMONIC, 1).unwrap();
        assert_eq!(
            second.address(),
            address!("0x70997970C51812dc3A010C7d01b50e0d17dc79C8")
        );
    }

    #[test]
    fn private_key_takes_precedence() {
        let key = "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";
        let signer = signer(Some(key), DEV_MNEMONIC, 0).unwrap();
        assert_eq!(
            signer.address(),
            address!("0x70997970C51812dc3A010C7d01b50e0d17dc79C8")
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(signer(Some("0xnot-a-key"), DEV_MNEMONIC, 0).is_err());
        assert!(signer(None, "definitely not a bip39 phrase", 0).is_err());
    }
}
