//! Command-line entry points: deploy a contract, or run the example
//! invoke flow against a deployed one.

use anyhow::Context;
use chainwright::abi::ContractArtifact;
use chainwright::chain::EthereumClient;
use chainwright::compiler::SolcCompiler;
use chainwright::config::Settings;
use chainwright::lifecycle::{ConfirmPolicy, TxLifecycle};
use chainwright::tx::{TxParams, TxSigner};
use clap::{Parser, Subcommand};
use ethers::abi::Token;
use ethers::types::{Address, U256};
use ethers::utils::keccak256;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chainwright", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile a contract, deploy it, and export its artifact.
    Deploy {
        /// Solidity source file.
        #[arg(long)]
        source: PathBuf,
        /// Contract name, required when the source defines several.
        #[arg(long)]
        contract: Option<String>,
        /// Output path for the ABI + bytecode artifact.
        #[arg(long, default_value = "artifact.json")]
        artifact: PathBuf,
    },
    /// Run the example register / read / delete flow against a
    /// deployed contract.
    Invoke {
        /// Artifact exported by a previous deploy.
        #[arg(long, default_value = "artifact.json")]
        artifact: PathBuf,
        /// Contract address; falls back to the configured one.
        #[arg(long)]
        address: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let settings = Settings::load().context("loading configuration")?;

    let client = EthereumClient::new(&settings.rpc_url)?;
    let signer = TxSigner::from_key(&settings.private_key, settings.chain_id)?;
    let confirm = ConfirmPolicy::new(settings.poll_interval(), settings.confirm_timeout());
    let lifecycle = TxLifecycle::new(client, signer, confirm);

    match cli.command {
        Command::Deploy {
            source,
            contract,
            artifact,
        } => deploy(&lifecycle, &settings, &source, contract.as_deref(), &artifact).await,
        Command::Invoke { artifact, address } => {
            invoke(&lifecycle, &settings, &artifact, address.as_deref()).await
        }
    }
}

async fn deploy(
    lifecycle: &TxLifecycle<EthereumClient>,
    settings: &Settings,
    source: &Path,
    contract: Option<&str>,
    artifact_path: &Path,
) -> anyhow::Result<()> {
    let artifact = SolcCompiler::default()
        .compile(source, contract)
        .await
        .context("compiling contract")?;
    artifact.save(artifact_path)?;
    println!("ABI exported to {}", artifact_path.display());

    let init_code = artifact
        .codec()
        .encode_constructor(&artifact.init_code()?, &[])?;
    let params = TxParams::new(
        settings.deploy_gas_limit,
        settings.gas_price_wei(),
        settings.chain_id,
    );
    let deployment = lifecycle.deploy(init_code, &params).await?;

    println!(
        "Contract deployed at address: {:?}",
        deployment.contract_address
    );
    println!(
        "Add this to your .env file:\nCHAINWRIGHT_CONTRACT_ADDRESS={:?}",
        deployment.contract_address
    );
    Ok(())
}

async fn invoke(
    lifecycle: &TxLifecycle<EthereumClient>,
    settings: &Settings,
    artifact_path: &Path,
    address: Option<&str>,
) -> anyhow::Result<()> {
    let artifact = ContractArtifact::load(artifact_path)?;
    let address: Address = match address {
        Some(raw) => raw
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid contract address: {raw}"))?,
        None => settings.parse_contract_address()?,
    };
    let handle = artifact.handle(address);
    let params = TxParams::new(
        settings.invoke_gas_limit,
        settings.gas_price_wei(),
        settings.chain_id,
    );

    let record_hash = Token::FixedBytes(keccak256("example_healthcare_data").to_vec());

    let receipt = lifecycle
        .invoke(
            &handle,
            "RegisterHealthcare",
            &[
                record_hash.clone(),
                Token::String("010-1234-5678".to_string()),
                Token::Uint(U256::zero()),
                Token::String("Seoul Hospital".to_string()),
            ],
            &params,
        )
        .await?;
    println!("RegisterHealthcare tx: {:?}", receipt.tx_hash);

    let info = lifecycle
        .call(&handle, "GetHealthcareInfo", &[record_hash.clone()])
        .await?;
    println!("Healthcare info: {info:?}");

    let receipt = lifecycle
        .invoke(&handle, "DeleteHealthcare", &[record_hash], &params)
        .await?;
    println!("DeleteHealthcare tx: {:?}", receipt.tx_hash);
    Ok(())
}
