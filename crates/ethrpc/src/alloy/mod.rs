mod instrumentation;
pub mod wallet;

pub use wallet::{DEV_MNEMONIC, signer};
use {
    crate::AlloyProvider,
    alloy::{
        network::EthereumWallet,
        providers::{Provider, ProviderBuilder},
        rpc::client::ClientBuilder,
        signers::local::PrivateKeySigner,
    },
    instrumentation::InstrumentationLayer,
    url::Url,
};

/// Creates a provider connected to `url` that fills and signs every
/// transaction it sends with `signer`. Nonce, gas and chain id are filled by
/// alloy's recommended fillers.
pub fn provider_with_signer(url: &Url, signer: PrivateKeySigner) -> AlloyProvider {
    let rpc = ClientBuilder::default()
        .layer(InstrumentationLayer {
            label: "main".into(),
        })
        .http(url.clone());

    ProviderBuilder::new()
        .wallet(EthereumWallet::new(signer))
        .connect_client(rpc)
        .erased()
}
