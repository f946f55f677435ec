//! # Transaction Lifecycle Manager
//!
//! Orchestrates deploy, invoke, and read-only call workflows.
//!
//! Every state-changing workflow is a single linear pipeline with no
//! intermediate persistence: fetch nonce → build → sign → broadcast →
//! wait for the receipt. The transaction hash is logged after signing
//! and before confirmation, so a crashed process can re-query the
//! transaction's fate.
//!
//! A submitted transaction moves through
//! `Built → Signed → Broadcast → {Pending → Mined}` or terminates in
//! `Rejected` (broadcast refused, no receipt) or `TimedOut`
//! (confirmation deadline expired). `Mined` is terminal and
//! authoritative.

use ethers::abi::Token;
use ethers::types::{Address, Bytes, H256};
use std::time::Duration;
use tokio::sync::Mutex;

use crate::abi::ContractHandle;
use crate::chain::{ChainClient, Receipt};
use crate::error::{ChainError, ChainResult};
use crate::tx::{TxParams, TxSigner, UnsignedTx};

/// Receipt polling policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmPolicy {
    /// Interval between receipt queries.
    pub poll_interval: Duration,
    /// Overall confirmation deadline.
    pub timeout: Duration,
}

impl ConfirmPolicy {
    /// Creates a policy from a poll interval and deadline.
    #[must_use]
    pub const fn new(poll_interval: Duration, timeout: Duration) -> Self {
        Self {
            poll_interval,
            timeout,
        }
    }
}

impl Default for ConfirmPolicy {
    fn default() -> Self {
        Self::new(Duration::from_secs(2), Duration::from_secs(120))
    }
}

/// Outcome of a successful contract deployment.
#[derive(Debug, Clone)]
pub struct Deployment {
    /// Receipt of the creation transaction.
    pub receipt: Receipt,
    /// Address of the newly created contract.
    pub contract_address: Address,
}

/// Composes signing, encoding, building, and the chain client into
/// complete transaction workflows.
///
/// Holds an explicit context (client, signer, confirmation policy)
/// rather than process-wide state, so workflows can run against a mock
/// chain in tests.
///
/// The account's effective nonce is a single-writer resource: an
/// internal lock serializes the fetch-nonce → broadcast → confirm span
/// of every state-changing workflow, so at most one unconfirmed
/// transaction per account is ever in flight.
#[derive(Debug)]
pub struct TxLifecycle<C> {
    client: C,
    signer: TxSigner,
    confirm: ConfirmPolicy,
    inflight: Mutex<()>,
}

impl<C: ChainClient> TxLifecycle<C> {
    /// Creates a lifecycle manager from its collaborators.
    #[must_use]
    pub fn new(client: C, signer: TxSigner, confirm: ConfirmPolicy) -> Self {
        Self {
            client,
            signer,
            confirm,
            inflight: Mutex::new(()),
        }
    }

    /// Returns the sender address.
    #[must_use]
    pub fn sender(&self) -> Address {
        self.signer.address()
    }

    /// Deploys a contract from init-code.
    ///
    /// Builds a creation transaction with no recipient, signs and
    /// broadcasts it, waits for the receipt, and extracts the new
    /// contract address. If any step fails the whole workflow fails
    /// and no contract is considered deployed.
    ///
    /// # Errors
    ///
    /// Propagates build, signing, broadcast, and confirmation errors;
    /// `ChainError::Internal` if a successful creation receipt carries
    /// no contract address.
    pub async fn deploy(&self, init_code: Bytes, params: &TxParams) -> ChainResult<Deployment> {
        let receipt = self.submit(None, init_code, params).await?;
        let contract_address = receipt.contract_address.ok_or_else(|| {
            ChainError::internal("creation receipt carries no contract address")
        })?;
        tracing::info!(
            contract = ?contract_address,
            block = receipt.block_number,
            "contract deployed"
        );
        Ok(Deployment {
            receipt,
            contract_address,
        })
    }

    /// Invokes a state-changing contract function.
    ///
    /// Call-data encoding happens before any network interaction, so
    /// an encoding error never broadcasts a partial transaction.
    /// Whether a reverted receipt is a usage error or a contract-logic
    /// error is the caller's call; it always surfaces as
    /// `ChainError::TransactionFailed`.
    ///
    /// # Errors
    ///
    /// Propagates encoding, build, signing, broadcast, and
    /// confirmation errors.
    pub async fn invoke(
        &self,
        handle: &ContractHandle,
        function: &str,
        args: &[Token],
        params: &TxParams,
    ) -> ChainResult<Receipt> {
        let data = handle.codec().encode_call(function, args)?;
        self.submit(Some(handle.address()), data, params).await
    }

    /// Executes a read-only contract function and decodes the result.
    ///
    /// Never touches the nonce, signing, or the mempool.
    ///
    /// # Errors
    ///
    /// Propagates encoding and decoding errors,
    /// `ChainError::ExecutionReverted` if the contract aborts, and
    /// transport errors from the client.
    pub async fn call(
        &self,
        handle: &ContractHandle,
        function: &str,
        args: &[Token],
    ) -> ChainResult<Vec<Token>> {
        let data = handle.codec().encode_call(function, args)?;
        let output = self.client.call(handle.address(), data).await?;
        handle.codec().decode_output(function, &output)
    }

    /// Polls for a transaction's receipt until mined or the deadline
    /// expires.
    ///
    /// Transient `NetworkUnavailable` poll failures are retried; any
    /// other poll error is definitive. The returned receipt is always
    /// terminal, never pending. Dropping the returned future abandons
    /// polling without affecting the broadcast transaction, which
    /// remains pending on-chain; no background task is leaked.
    ///
    /// # Errors
    ///
    /// Returns `ChainError::Timeout` when the deadline expires and
    /// `ChainError::TransactionFailed` when the mined receipt reports
    /// failure.
    pub async fn wait_for_receipt(
        &self,
        tx_hash: H256,
        poll_interval: Duration,
        timeout: Duration,
    ) -> ChainResult<Receipt> {
        let poll = async {
            loop {
                match self.client.transaction_receipt(tx_hash).await {
                    Ok(Some(receipt)) => break Ok(receipt),
                    Ok(None) => {}
                    Err(e) if e.is_retryable() => {
                        tracing::debug!(tx_hash = ?tx_hash, error = %e, "receipt poll failed, retrying");
                    }
                    Err(e) => break Err(e),
                }
                tokio::time::sleep(poll_interval).await;
            }
        };

        let receipt = tokio::time::timeout(timeout, poll).await.map_err(|_| {
            ChainError::timeout(format!(
                "no receipt for {tx_hash:?} within {}ms",
                timeout.as_millis()
            ))
        })??;

        if receipt.is_success() {
            tracing::info!(tx_hash = ?tx_hash, block = receipt.block_number, "transaction mined");
            Ok(receipt)
        } else {
            tracing::warn!(tx_hash = ?tx_hash, block = receipt.block_number, "transaction reverted");
            Err(ChainError::transaction_failed(tx_hash))
        }
    }

    /// Runs the state-changing pipeline under the in-flight lock.
    async fn submit(
        &self,
        to: Option<Address>,
        data: Bytes,
        params: &TxParams,
    ) -> ChainResult<Receipt> {
        let _inflight = self.inflight.lock().await;

        let nonce = self.client.transaction_count(self.signer.address()).await?;
        let tx = UnsignedTx::build(params, to, data, nonce)?;
        let signed = self.signer.sign(&tx)?;

        // The hash must be on record before blocking on confirmation:
        // if the process dies mid-wait, this line is how the
        // transaction's fate gets re-queried.
        tracing::info!(
            tx_hash = ?signed.hash(),
            nonce,
            creation = tx.is_contract_creation(),
            "broadcasting transaction"
        );

        let tx_hash = self.client.send_raw_transaction(signed.raw().clone()).await?;
        self.wait_for_receipt(tx_hash, self.confirm.poll_interval, self.confirm.timeout)
            .await
    }
}
