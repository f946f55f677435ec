//! # Transaction Signer
//!
//! Deterministic ECDSA signing over a locally-held private key.
//!
//! Signatures use the RFC 6979 deterministic nonce scheme (not to be
//! confused with the transaction nonce): signing the same transaction
//! with the same key always produces identical bytes. The EIP-155 `v`
//! value is derived from the transaction's chain id.

use ethers::signers::{LocalWallet, Signer as _};
use ethers::types::Address;
use ethers::utils::keccak256;
use std::fmt;

use crate::error::{ChainError, ChainResult};
use crate::tx::{SignedTx, UnsignedTx};

/// Holds an account's private key and produces transaction signatures.
///
/// Constructed once at startup and exclusively owned for the process
/// lifetime. Signing is synchronous and side-effect free.
pub struct TxSigner {
    wallet: LocalWallet,
    chain_id: u64,
}

impl TxSigner {
    /// Creates a signer from a hex-encoded 32-byte private key.
    ///
    /// Accepts the key with or without a `0x` prefix. The chain id is
    /// fixed at construction; every signed transaction must carry the
    /// same id.
    ///
    /// # Errors
    ///
    /// Returns `ChainError::InvalidKey` if the key is malformed.
    pub fn from_key(private_key: &str, chain_id: u64) -> ChainResult<Self> {
        let wallet: LocalWallet = private_key
            .trim_start_matches("0x")
            .parse()
            .map_err(|e| ChainError::invalid_key(format!("{e}")))?;
        Ok(Self {
            wallet: wallet.with_chain_id(chain_id),
            chain_id,
        })
    }

    /// Returns the 20-byte address derived from the key.
    #[must_use]
    pub fn address(&self) -> Address {
        self.wallet.address()
    }

    /// Returns the chain id this signer is bound to.
    #[must_use]
    pub const fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Signs a transaction, producing its broadcast-ready RLP encoding
    /// and content-addressing hash.
    ///
    /// Deterministic: identical input always yields identical output.
    ///
    /// # Errors
    ///
    /// Returns `ChainError::InvalidTransactionParameters` if the
    /// transaction's chain id differs from the signer's, or
    /// `ChainError::InvalidKey` if signing fails.
    pub fn sign(&self, tx: &UnsignedTx) -> ChainResult<SignedTx> {
        if tx.chain_id != self.chain_id {
            return Err(ChainError::invalid_transaction_parameters(format!(
                "chain id mismatch: transaction has {}, signer is bound to {}",
                tx.chain_id, self.chain_id
            )));
        }

        let typed = tx.to_typed();
        let signature = self
            .wallet
            .sign_transaction_sync(&typed)
            .map_err(|e| ChainError::invalid_key(e.to_string()))?;
        let raw = typed.rlp_signed(&signature);
        let hash = keccak256(&raw).into();
        Ok(SignedTx::new(raw, hash))
    }
}

impl fmt::Debug for TxSigner {
    // never expose the key
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TxSigner")
            .field("address", &self.address())
            .field("chain_id", &self.chain_id)
            .finish()
    }
}
