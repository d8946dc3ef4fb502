//! These tests need an `anvil` binary in `PATH`. Run them with
//! `cargo test -p deployer -- --ignored`.

use {
    alloy::{
        node_bindings::{Anvil, AnvilInstance},
        primitives::address,
        providers::{Provider, ProviderBuilder},
    },
    contracts::{Artifacts, Confirmation, DeploymentError, HardhatToolchain},
    serde_json::json,
    std::{fs, path::Path},
    tempfile::TempDir,
};

/// Creation code of a contract whose runtime code returns 42 for any call.
const ANSWER: &str = "0x600a600c600039600a6000f3602a60005260206000f3";
/// Creation code that reverts right away.
const REVERTING: &str = "0x60006000fd";

fn artifacts(bytecode: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("contracts/Leozuki.sol/Leozuki.json");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let artifact = json!({
        "_format": "hh-sol-artifact-1",
        "contractName": "Leozuki",
        "sourceName": "contracts/Leozuki.sol",
        "abi": [],
        "bytecode": bytecode,
        "deployedBytecode": "0x602a60005260206000f3",
        "linkReferences": {},
        "deployedLinkReferences": {}
    });
    fs::write(path, artifact.to_string()).unwrap();
    dir
}

fn toolchain(anvil: &AnvilInstance, artifacts: &Path) -> HardhatToolchain {
    observe::tracing::initialize_reentrant(
        &observe::Config::default().with_env_filter("warn,deployer=debug,contracts=debug"),
    );
    let signer = ethrpc::alloy::signer(None, ethrpc::alloy::DEV_MNEMONIC, 0).unwrap();
    let deployer = signer.address();
    HardhatToolchain::new(
        Artifacts::new(artifacts),
        ethrpc::alloy::provider_with_signer(&anvil.endpoint_url(), signer),
        deployer,
        Confirmation::default(),
    )
}

#[tokio::test]
#[ignore]
async fn local_node_deploys_new_instance_every_run() {
    let anvil = Anvil::new().spawn();
    let dir = artifacts(ANSWER);
    let toolchain = toolchain(&anvil, dir.path());

    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let code = deployer::execute(&toolchain, "Leozuki", &mut stdout, &mut stderr).await;
    assert_eq!(code, deployer::EXIT_SUCCESS);
    // First contract created by the first dev account on a fresh chain.
    assert_eq!(
        String::from_utf8(stdout).unwrap(),
        "Leozuki deployed to: 0x5FbDB2315678afecb367f032d93F642f64180aa3\n"
    );

    let second = deployer::run(&toolchain, "Leozuki").await.unwrap();
    assert_ne!(
        second.deployment.address,
        address!("0x5FbDB2315678afecb367f032d93F642f64180aa3")
    );

    let provider = ProviderBuilder::new().connect_http(anvil.endpoint_url());
    let code = provider
        .get_code_at(second.deployment.address)
        .await
        .unwrap();
    assert_eq!(
        code.to_vec(),
        vec![0x60, 0x2a, 0x60, 0x00, 0x52, 0x60, 0x20, 0x60, 0x00, 0xf3]
    );
}

#[tokio::test]
#[ignore]
async fn local_node_reverting_constructor_fails() {
    let anvil = Anvil::new().spawn();
    let dir = artifacts(REVERTING);
    let toolchain = toolchain(&anvil, dir.path());

    let err = deployer::run(&toolchain, "Leozuki").await.unwrap_err();
    assert!(matches!(
        err,
        deployer::Error::Deployment(
            DeploymentError::Submission(_) | DeploymentError::Reverted(_)
        )
    ));
}

#[tokio::test]
#[ignore]
async fn local_node_unknown_contract_fails() {
    let anvil = Anvil::new().spawn();
    let dir = artifacts(ANSWER);
    let toolchain = toolchain(&anvil, dir.path());

    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let code = deployer::execute(&toolchain, "Missing", &mut stdout, &mut stderr).await;
    assert_eq!(code, deployer::EXIT_FAILURE);
    assert!(stdout.is_empty());
    assert!(!stderr.is_empty());
}
