//! # Transaction Assembly
//!
//! Builds and signs transactions.
//!
//! ## Available Components
//!
//! - [`TxParams`]: caller-supplied fee and chain parameters
//! - [`UnsignedTx`]: validated, fully-assembled legacy transaction
//! - [`SignedTx`]: RLP-encoded signed transaction, content-addressed
//!   by its keccak256 hash
//! - [`TxSigner`]: deterministic ECDSA signer over a private key
//!
//! A transaction flows one way: `UnsignedTx` → `SignedTx` → broadcast.
//! Nothing is mutated or reused after signing.

pub mod signer;

pub use signer::TxSigner;

use ethers::types::transaction::eip2718::TypedTransaction;
use ethers::types::{Address, Bytes, TransactionRequest, H256, U256};

use crate::error::{ChainError, ChainResult};

/// Fee and chain parameters for a transaction.
///
/// The nonce is deliberately not part of the parameters: it is fetched
/// from the network immediately before building, under the lifecycle
/// manager's in-flight lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxParams {
    /// Wei amount transferred with the call.
    pub value: U256,
    /// Gas limit; must be positive.
    pub gas_limit: u64,
    /// Gas price in wei per gas.
    pub gas_price: U256,
    /// Chain id for EIP-155 replay protection.
    pub chain_id: u64,
}

impl TxParams {
    /// Creates parameters with zero value.
    #[must_use]
    pub const fn new(gas_limit: u64, gas_price: U256, chain_id: u64) -> Self {
        Self {
            value: U256::zero(),
            gas_limit,
            gas_price,
            chain_id,
        }
    }

    /// Sets the wei amount transferred with the call.
    #[must_use]
    pub const fn with_value(mut self, value: U256) -> Self {
        self.value = value;
        self
    }
}

/// A fully-assembled unsigned legacy transaction.
///
/// Invariant: `nonce` must equal the account's on-chain transaction
/// count at the moment of broadcast, or the network rejects the
/// transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsignedTx {
    /// Per-account monotonically increasing counter.
    pub nonce: u64,
    /// Recipient; `None` for contract creation.
    pub to: Option<Address>,
    /// Wei amount.
    pub value: U256,
    /// Gas limit.
    pub gas_limit: u64,
    /// Gas price in wei per gas.
    pub gas_price: U256,
    /// Chain id.
    pub chain_id: u64,
    /// Call-data for an invocation, or init-code for a creation.
    pub data: Bytes,
}

impl UnsignedTx {
    /// Assembles a transaction from validated parts.
    ///
    /// Pure data assembly: no I/O, no side effects. The nonce's
    /// non-negativity invariant is carried by its unsigned type.
    ///
    /// # Errors
    ///
    /// Returns `ChainError::InvalidTransactionParameters` if
    /// `gas_limit` is zero.
    pub fn build(
        params: &TxParams,
        to: Option<Address>,
        data: Bytes,
        nonce: u64,
    ) -> ChainResult<Self> {
        if params.gas_limit == 0 {
            return Err(ChainError::invalid_transaction_parameters(
                "gas limit must be positive",
            ));
        }

        Ok(Self {
            nonce,
            to,
            value: params.value,
            gas_limit: params.gas_limit,
            gas_price: params.gas_price,
            chain_id: params.chain_id,
            data,
        })
    }

    /// Returns true if this transaction creates a contract.
    #[must_use]
    pub const fn is_contract_creation(&self) -> bool {
        self.to.is_none()
    }

    /// Converts into the ethers transaction representation used for
    /// signing and RLP encoding.
    #[must_use]
    pub fn to_typed(&self) -> TypedTransaction {
        let mut request = TransactionRequest::new()
            .nonce(self.nonce)
            .value(self.value)
            .gas(self.gas_limit)
            .gas_price(self.gas_price)
            .chain_id(self.chain_id)
            .data(self.data.clone());
        if let Some(to) = self.to {
            request = request.to(to);
        }
        TypedTransaction::Legacy(request)
    }
}

/// A signed transaction, immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTx {
    raw: Bytes,
    hash: H256,
}

impl SignedTx {
    /// Creates a signed transaction from its RLP encoding and hash.
    pub(crate) const fn new(raw: Bytes, hash: H256) -> Self {
        Self { raw, hash }
    }

    /// Returns the RLP-encoded signed bytes for broadcast.
    #[must_use]
    pub const fn raw(&self) -> &Bytes {
        &self.raw
    }

    /// Returns the transaction hash (keccak256 of the raw encoding).
    ///
    /// Available before broadcast, so callers can record it and
    /// re-query the transaction's fate after a crash.
    #[must_use]
    pub const fn hash(&self) -> H256 {
        self.hash
    }
}
