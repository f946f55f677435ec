//! # Chain Client Port
//!
//! Trait definition for JSON-RPC chain interactions.
//!
//! This module defines the [`ChainClient`] trait that abstracts the
//! four network operations the transaction lifecycle depends on, so
//! workflows can be tested against a mock chain.

use async_trait::async_trait;
use ethers::types::{Address, Bytes, H256};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ChainResult;

/// Outcome of a mined transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxStatus {
    /// The transaction executed successfully.
    Success,
    /// The transaction was mined but execution reverted.
    Failure,
}

/// A log entry emitted during transaction execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Address of the emitting contract.
    pub address: Address,
    /// Indexed event topics.
    pub topics: Vec<H256>,
    /// Unindexed event data.
    pub data: Bytes,
}

/// Network-produced record confirming a transaction was mined.
///
/// Only ever observed for mined transactions; a pending transaction
/// has no receipt. `Mined` is terminal and authoritative; chain
/// reorganizations are out of scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// Hash of the mined transaction.
    pub tx_hash: H256,
    /// Block the transaction was included in.
    pub block_number: u64,
    /// Gas consumed by execution.
    pub gas_used: u64,
    /// Execution outcome.
    pub status: TxStatus,
    /// New contract address; set only for creation transactions.
    pub contract_address: Option<Address>,
    /// Logs emitted during execution.
    pub logs: Vec<LogEntry>,
}

impl Receipt {
    /// Returns true if execution succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.status, TxStatus::Success)
    }
}

/// Trait for chain client operations.
///
/// A JSON-RPC facade over the network. These four operations are the
/// only suspension points in the system; signing, encoding, and
/// building are all synchronous.
#[async_trait]
pub trait ChainClient: Send + Sync + fmt::Debug {
    /// Returns the next valid nonce for the account.
    ///
    /// Reflects all transactions the network has observed, including
    /// pending ones.
    ///
    /// # Errors
    ///
    /// Returns `ChainError::NetworkUnavailable` if the RPC call fails.
    async fn transaction_count(&self, address: Address) -> ChainResult<u64>;

    /// Executes a read-only call against the latest confirmed state.
    ///
    /// No nonce, no fee, no state mutation.
    ///
    /// # Errors
    ///
    /// Returns `ChainError::ExecutionReverted` with the revert reason
    /// if the contract aborts, or `ChainError::NetworkUnavailable` on
    /// transport failure.
    async fn call(&self, to: Address, data: Bytes) -> ChainResult<Bytes>;

    /// Broadcasts a raw signed transaction.
    ///
    /// # Errors
    ///
    /// Returns `ChainError::NonceTooLow`,
    /// `ChainError::InsufficientFunds`, or `ChainError::Underpriced`
    /// if the network rejects the transaction before inclusion, or
    /// `ChainError::NetworkUnavailable` on transport failure.
    async fn send_raw_transaction(&self, raw: Bytes) -> ChainResult<H256>;

    /// Fetches the receipt for a transaction, if mined.
    ///
    /// Returns `None` while the transaction is pending; a returned
    /// receipt is always terminal.
    ///
    /// # Errors
    ///
    /// Returns `ChainError::NetworkUnavailable` if the RPC call fails.
    async fn transaction_receipt(&self, tx_hash: H256) -> ChainResult<Option<Receipt>>;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_receipt(status: TxStatus) -> Receipt {
        Receipt {
            tx_hash: H256::repeat_byte(0x01),
            block_number: 100,
            gas_used: 21_000,
            status,
            contract_address: None,
            logs: vec![],
        }
    }

    #[test]
    fn receipt_success() {
        assert!(sample_receipt(TxStatus::Success).is_success());
        assert!(!sample_receipt(TxStatus::Failure).is_success());
    }

    #[test]
    fn tx_status_serde() {
        assert_eq!(
            serde_json::to_string(&TxStatus::Success).unwrap(),
            "\"success\""
        );
        assert_eq!(
            serde_json::to_string(&TxStatus::Failure).unwrap(),
            "\"failure\""
        );
    }

    #[test]
    fn receipt_serde_round_trip() {
        let receipt = Receipt {
            contract_address: Some(Address::repeat_byte(0x42)),
            logs: vec![LogEntry {
                address: Address::repeat_byte(0x42),
                topics: vec![H256::repeat_byte(0x07)],
                data: Bytes::from(vec![0x01]),
            }],
            ..sample_receipt(TxStatus::Success)
        };
        let json = serde_json::to_string(&receipt).unwrap();
        let back: Receipt = serde_json::from_str(&json).unwrap();
        assert_eq!(receipt, back);
    }
}
