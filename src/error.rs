//! # Error Types
//!
//! Error taxonomy for the transaction lifecycle.
//!
//! Errors fall into three groups:
//!
//! - **Local validation** (`InvalidKey`, `FunctionNotFound`,
//!   `ArgumentTypeMismatch`, `InvalidTransactionParameters`): surfaced
//!   before any network interaction, so a malformed transaction is never
//!   broadcast.
//! - **Network rejection** (`NonceTooLow`, `InsufficientFunds`,
//!   `Underpriced`, `ExecutionReverted`): definitive answers from the
//!   node; retrying the same submission is unsafe and is never done
//!   implicitly.
//! - **Confirmation** (`Timeout`, `TransactionFailed`,
//!   `NetworkUnavailable`): outcomes of waiting for inclusion. Only
//!   `NetworkUnavailable` is transient.

use ethers::types::H256;
use thiserror::Error;

/// Error type for contract compilation, deployment, and invocation.
#[derive(Debug, Error)]
pub enum ChainError {
    /// The private key is malformed or cannot be used for signing.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// No function with the given name exists in the ABI descriptor.
    #[error("function not found in ABI: {0}")]
    FunctionNotFound(String),

    /// An argument's shape does not match the declared parameter type.
    #[error("argument type mismatch: {0}")]
    ArgumentTypeMismatch(String),

    /// Transaction parameters failed local validation.
    #[error("invalid transaction parameters: {0}")]
    InvalidTransactionParameters(String),

    /// The network rejected the transaction because its nonce is stale.
    #[error("nonce too low")]
    NonceTooLow,

    /// The sender's balance cannot cover value plus gas.
    #[error("insufficient funds")]
    InsufficientFunds,

    /// The gas price is below the network's acceptance threshold.
    #[error("transaction underpriced")]
    Underpriced,

    /// The contract aborted execution, rolling back all effects.
    #[error("execution reverted: {0}")]
    ExecutionReverted(String),

    /// The transaction was mined but its receipt reports failure.
    #[error("transaction failed: {0:?}")]
    TransactionFailed(H256),

    /// Confirmation did not arrive within the caller's deadline.
    #[error("timeout: {0}")]
    Timeout(String),

    /// The RPC endpoint could not be reached or gave a transient error.
    #[error("network unavailable: {0}")]
    NetworkUnavailable(String),

    /// Configuration is missing or malformed.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A compilation artifact could not be read, written, or parsed.
    #[error("artifact error: {0}")]
    Artifact(String),

    /// The external compiler is missing or reported an error.
    #[error("compiler failed: {0}")]
    CompilerFailed(String),

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ChainError {
    /// Creates an invalid key error.
    #[must_use]
    pub fn invalid_key(message: impl Into<String>) -> Self {
        Self::InvalidKey(message.into())
    }

    /// Creates a function not found error.
    #[must_use]
    pub fn function_not_found(name: impl Into<String>) -> Self {
        Self::FunctionNotFound(name.into())
    }

    /// Creates an argument type mismatch error.
    #[must_use]
    pub fn argument_type_mismatch(message: impl Into<String>) -> Self {
        Self::ArgumentTypeMismatch(message.into())
    }

    /// Creates an invalid transaction parameters error.
    #[must_use]
    pub fn invalid_transaction_parameters(message: impl Into<String>) -> Self {
        Self::InvalidTransactionParameters(message.into())
    }

    /// Creates an execution reverted error with the revert reason.
    #[must_use]
    pub fn execution_reverted(reason: impl Into<String>) -> Self {
        Self::ExecutionReverted(reason.into())
    }

    /// Creates a transaction failed error for a mined-but-reverted hash.
    #[must_use]
    pub const fn transaction_failed(tx_hash: H256) -> Self {
        Self::TransactionFailed(tx_hash)
    }

    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout(message.into())
    }

    /// Creates a network unavailable error.
    #[must_use]
    pub fn network_unavailable(message: impl Into<String>) -> Self {
        Self::NetworkUnavailable(message.into())
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Creates an artifact error.
    #[must_use]
    pub fn artifact(message: impl Into<String>) -> Self {
        Self::Artifact(message.into())
    }

    /// Creates a compiler failed error.
    #[must_use]
    pub fn compiler_failed(message: impl Into<String>) -> Self {
        Self::CompilerFailed(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Returns true if retrying the same operation may succeed.
    ///
    /// Only transport-level failures and expired deadlines are
    /// retryable. Definitive rejections and mined failures are not.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::NetworkUnavailable(_) | Self::Timeout(_))
    }

    /// Returns true if the network definitively rejected the
    /// transaction before inclusion.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::NonceTooLow | Self::InsufficientFunds | Self::Underpriced
        )
    }

    /// Returns true if this is a local validation failure, raised
    /// without any network interaction.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidKey(_)
                | Self::FunctionNotFound(_)
                | Self::ArgumentTypeMismatch(_)
                | Self::InvalidTransactionParameters(_)
        )
    }
}

/// Result type for chain operations.
pub type ChainResult<T> = Result<T, ChainError>;
