//! # Compilation Artifacts
//!
//! On-disk cache of compiler output.
//!
//! A [`ContractArtifact`] carries the ABI descriptor and init bytecode
//! produced by the compiler. Deploy writes it next to the project so
//! that later invocations can rebuild a codec without recompiling,
//! mirroring the exported `*_abi.json` workflow.

use ethers::abi::Abi;
use ethers::types::Address;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::abi::{AbiCodec, ContractHandle};
use crate::error::{ChainError, ChainResult};

/// Compiler output for a single contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractArtifact {
    /// Contract name as declared in the source.
    pub contract_name: String,
    /// ABI descriptor.
    pub abi: Abi,
    /// Hex-encoded init bytecode, with or without `0x` prefix.
    pub bytecode: String,
}

impl ContractArtifact {
    /// Creates an artifact from compiler output.
    #[must_use]
    pub const fn new(contract_name: String, abi: Abi, bytecode: String) -> Self {
        Self {
            contract_name,
            abi,
            bytecode,
        }
    }

    /// Loads an artifact from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `ChainError::Artifact` if the file cannot be read or
    /// does not parse.
    pub fn load(path: &Path) -> ChainResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ChainError::artifact(format!("cannot read {}: {e}", path.display()))
        })?;
        serde_json::from_str(&raw)
            .map_err(|e| ChainError::artifact(format!("cannot parse {}: {e}", path.display())))
    }

    /// Writes the artifact as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns `ChainError::Artifact` if serialization or the write
    /// fails.
    pub fn save(&self, path: &Path) -> ChainResult<()> {
        let raw = serde_json::to_string_pretty(self)
            .map_err(|e| ChainError::artifact(e.to_string()))?;
        std::fs::write(path, raw).map_err(|e| {
            ChainError::artifact(format!("cannot write {}: {e}", path.display()))
        })
    }

    /// Decodes the init bytecode from hex.
    ///
    /// # Errors
    ///
    /// Returns `ChainError::Artifact` if the bytecode is not valid hex
    /// or is empty.
    pub fn init_code(&self) -> ChainResult<Vec<u8>> {
        let stripped = self.bytecode.trim_start_matches("0x");
        if stripped.is_empty() {
            return Err(ChainError::artifact(format!(
                "{}: empty bytecode",
                self.contract_name
            )));
        }
        hex::decode(stripped)
            .map_err(|e| ChainError::artifact(format!("{}: invalid bytecode hex: {e}", self.contract_name)))
    }

    /// Returns a codec over this artifact's ABI.
    #[must_use]
    pub fn codec(&self) -> AbiCodec {
        AbiCodec::new(self.abi.clone())
    }

    /// Binds this artifact's ABI to a deployed address.
    #[must_use]
    pub fn handle(&self, address: Address) -> ContractHandle {
        ContractHandle::new(address, self.codec())
    }
}
