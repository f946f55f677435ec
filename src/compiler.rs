//! # Solidity Compiler Collaborator
//!
//! Thin wrapper around the external `solc` binary.
//!
//! The core never parses contract source; it consumes the compiler's
//! `--combined-json abi,bin` output as an opaque
//! [`ContractArtifact`]. Older solc releases emit the ABI as a JSON
//! string, newer ones as an array; both are accepted.

use std::path::Path;
use tokio::process::Command;

use crate::abi::ContractArtifact;
use crate::error::{ChainError, ChainResult};

/// Invokes `solc` and collects its output.
#[derive(Debug, Clone)]
pub struct SolcCompiler {
    solc_path: String,
}

impl SolcCompiler {
    /// Creates a compiler using a specific `solc` executable.
    #[must_use]
    pub fn new(solc_path: impl Into<String>) -> Self {
        Self {
            solc_path: solc_path.into(),
        }
    }

    /// Compiles a source file into an artifact.
    ///
    /// When `contract` is `None` the source must define exactly one
    /// contract.
    ///
    /// # Errors
    ///
    /// Returns `ChainError::CompilerFailed` if `solc` cannot be run,
    /// exits non-zero, or its output cannot be parsed.
    pub async fn compile(
        &self,
        source: &Path,
        contract: Option<&str>,
    ) -> ChainResult<ContractArtifact> {
        let output = Command::new(&self.solc_path)
            .arg("--combined-json")
            .arg("abi,bin")
            .arg(source)
            .output()
            .await
            .map_err(|e| {
                ChainError::compiler_failed(format!("cannot run {}: {e}", self.solc_path))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ChainError::compiler_failed(format!(
                "solc exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_combined_json(&stdout, contract)
    }
}

impl Default for SolcCompiler {
    fn default() -> Self {
        Self::new("solc")
    }
}

/// Parses `solc --combined-json abi,bin` output into an artifact.
fn parse_combined_json(stdout: &str, contract: Option<&str>) -> ChainResult<ContractArtifact> {
    let parsed: serde_json::Value = serde_json::from_str(stdout)
        .map_err(|e| ChainError::compiler_failed(format!("unparseable solc output: {e}")))?;
    let contracts = parsed
        .get("contracts")
        .and_then(serde_json::Value::as_object)
        .ok_or_else(|| ChainError::compiler_failed("no contracts in solc output"))?;

    // keys look like "contracts/healthcare.sol:Healthcare"
    let mut selected = None;
    for (key, entry) in contracts {
        let name = key.rsplit(':').next().unwrap_or(key);
        match contract {
            Some(wanted) if wanted != name => continue,
            _ => {}
        }
        if selected.is_some() {
            return Err(ChainError::compiler_failed(
                "source defines multiple contracts; pass the contract name",
            ));
        }
        selected = Some((name.to_string(), entry));
    }

    let (name, entry) = selected.ok_or_else(|| {
        ChainError::compiler_failed(match contract {
            Some(wanted) => format!("contract {wanted} not found in solc output"),
            None => "no contract in solc output".to_string(),
        })
    })?;

    let abi_value = entry
        .get("abi")
        .ok_or_else(|| ChainError::compiler_failed(format!("{name}: no ABI in solc output")))?;
    let abi = match abi_value {
        serde_json::Value::String(raw) => serde_json::from_str(raw),
        other => serde_json::from_value(other.clone()),
    }
    .map_err(|e| ChainError::compiler_failed(format!("{name}: invalid ABI: {e}")))?;

    let bytecode = entry
        .get("bin")
        .and_then(serde_json::Value::as_str)
        .ok_or_else(|| {
            ChainError::compiler_failed(format!("{name}: no bytecode in solc output"))
        })?;

    Ok(ContractArtifact::new(name, abi, bytecode.to_string()))
}
