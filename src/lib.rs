//! # chainwright
//!
//! Compile, deploy, and invoke Ethereum smart contracts through a
//! signed-transaction lifecycle pipeline.
//!
//! The heart of the crate is the [`lifecycle::TxLifecycle`] manager,
//! which composes the other components into complete workflows:
//!
//! - [`tx::TxSigner`] holds the account key and produces deterministic
//!   ECDSA signatures
//! - [`abi::AbiCodec`] encodes function calls and decodes results
//!   against an ABI descriptor
//! - [`tx::UnsignedTx`] assembles and validates transactions
//! - [`chain::ChainClient`] is the JSON-RPC facade over the network
//!
//! The compiler ([`compiler::SolcCompiler`]), configuration
//! ([`config::Settings`]), and artifact cache
//! ([`abi::ContractArtifact`]) are thin external collaborators.
//!
//! ## Example
//!
//! ```no_run
//! use chainwright::abi::ContractArtifact;
//! use chainwright::chain::EthereumClient;
//! use chainwright::lifecycle::{ConfirmPolicy, TxLifecycle};
//! use chainwright::tx::{TxParams, TxSigner};
//! use ethers::types::U256;
//! use std::path::Path;
//!
//! # async fn run() -> Result<(), chainwright::error::ChainError> {
//! let client = EthereumClient::new("https://rpc.sepolia.org")?;
//! let signer = TxSigner::from_key("0x...", 11_155_111)?;
//! let lifecycle = TxLifecycle::new(client, signer, ConfirmPolicy::default());
//!
//! let artifact = ContractArtifact::load(Path::new("artifact.json"))?;
//! let params = TxParams::new(2_000_000, U256::from(10_000_000_000u64), 11_155_111);
//! let deployment = lifecycle
//!     .deploy(artifact.init_code()?.into(), &params)
//!     .await?;
//! println!("deployed at {:?}", deployment.contract_address);
//! # Ok(())
//! # }
//! ```

pub mod abi;
pub mod chain;
pub mod compiler;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod tx;

pub use abi::{AbiCodec, ContractArtifact, ContractHandle};
pub use chain::{ChainClient, EthereumClient, Receipt, TxStatus};
pub use config::Settings;
pub use error::{ChainError, ChainResult};
pub use lifecycle::{ConfirmPolicy, Deployment, TxLifecycle};
pub use tx::{SignedTx, TxParams, TxSigner, UnsignedTx};
