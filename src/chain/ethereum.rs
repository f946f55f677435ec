//! # Ethereum Client
//!
//! JSON-RPC chain client implementation using ethers-rs.
//!
//! Wraps an HTTP [`Provider`] and maps node responses onto the crate's
//! error taxonomy. Addresses, hashes, and quantities travel as
//! `0x`-prefixed hex per the JSON-RPC wire format; the encoding is
//! delegated to ethers.

use async_trait::async_trait;
use ethers::providers::{Http, Middleware, Provider};
use ethers::types::transaction::eip2718::TypedTransaction;
use ethers::types::{Address, BlockNumber, Bytes, TransactionRequest, H256};

use super::client::{ChainClient, LogEntry, Receipt, TxStatus};
use crate::error::{ChainError, ChainResult};

/// Chain client over an HTTP JSON-RPC endpoint.
#[derive(Debug, Clone)]
pub struct EthereumClient {
    provider: Provider<Http>,
}

impl EthereumClient {
    /// Creates a client for the given endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns `ChainError::Configuration` if the URL is invalid.
    pub fn new(rpc_url: &str) -> ChainResult<Self> {
        let provider = Provider::<Http>::try_from(rpc_url)
            .map_err(|e| ChainError::configuration(format!("invalid RPC URL {rpc_url}: {e}")))?;
        Ok(Self { provider })
    }
}

/// Classifies a node error message into the error taxonomy.
///
/// JSON-RPC error payloads are not standardized across nodes, so
/// rejections are recognized by message substrings. Anything
/// unrecognized is treated as a transport-level failure.
fn classify(message: String) -> ChainError {
    let lower = message.to_lowercase();
    if lower.contains("nonce too low") || lower.contains("invalid nonce") {
        ChainError::NonceTooLow
    } else if lower.contains("insufficient funds") {
        ChainError::InsufficientFunds
    } else if lower.contains("underpriced") {
        ChainError::Underpriced
    } else if lower.contains("revert") {
        ChainError::ExecutionReverted(revert_reason(&message))
    } else {
        ChainError::NetworkUnavailable(message)
    }
}

/// Extracts the revert reason from a node error message.
fn revert_reason(message: &str) -> String {
    message
        .split_once("execution reverted")
        .map(|(_, rest)| rest.trim_start_matches(':').trim())
        .filter(|reason| !reason.is_empty())
        .map_or_else(|| message.to_string(), str::to_string)
}

/// Converts a node receipt, gating on inclusion.
///
/// Returns `None` when the receipt carries no block number, so a
/// pending receipt is never surfaced.
fn convert_receipt(receipt: ethers::types::TransactionReceipt) -> Option<Receipt> {
    let block_number = receipt.block_number?.as_u64();
    let status = if receipt.status.map(|s| s.as_u64() == 1).unwrap_or(false) {
        TxStatus::Success
    } else {
        TxStatus::Failure
    };
    Some(Receipt {
        tx_hash: receipt.transaction_hash,
        block_number,
        gas_used: receipt.gas_used.map(|g| g.as_u64()).unwrap_or_default(),
        status,
        contract_address: receipt.contract_address,
        logs: receipt
            .logs
            .into_iter()
            .map(|log| LogEntry {
                address: log.address,
                topics: log.topics,
                data: log.data,
            })
            .collect(),
    })
}

#[async_trait]
impl ChainClient for EthereumClient {
    async fn transaction_count(&self, address: Address) -> ChainResult<u64> {
        self.provider
            .get_transaction_count(address, Some(BlockNumber::Pending.into()))
            .await
            .map(|n| n.as_u64())
            .map_err(|e| classify(e.to_string()))
    }

    async fn call(&self, to: Address, data: Bytes) -> ChainResult<Bytes> {
        let tx: TypedTransaction = TransactionRequest::new().to(to).data(data).into();
        self.provider
            .call(&tx, None)
            .await
            .map_err(|e| classify(e.to_string()))
    }

    async fn send_raw_transaction(&self, raw: Bytes) -> ChainResult<H256> {
        let pending = self
            .provider
            .send_raw_transaction(raw)
            .await
            .map_err(|e| classify(e.to_string()))?;
        Ok(pending.tx_hash())
    }

    async fn transaction_receipt(&self, tx_hash: H256) -> ChainResult<Option<Receipt>> {
        let receipt = self
            .provider
            .get_transaction_receipt(tx_hash)
            .await
            .map_err(|e| classify(e.to_string()))?;
        Ok(receipt.and_then(convert_receipt))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn rpc_result(value: serde_json::Value) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": value,
        }))
    }

    fn rpc_error(message: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": { "code": -32000, "message": message },
        }))
    }

    async fn mock_rpc(server: &MockServer, rpc_method: &str, response: ResponseTemplate) {
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "method": rpc_method })))
            .respond_with(response)
            .mount(server)
            .await;
    }

    #[test]
    fn classify_rejections() {
        assert!(matches!(
            classify("nonce too low".to_string()),
            ChainError::NonceTooLow
        ));
        assert!(matches!(
            classify("insufficient funds for gas * price + value".to_string()),
            ChainError::InsufficientFunds
        ));
        assert!(matches!(
            classify("transaction underpriced".to_string()),
            ChainError::Underpriced
        ));
        assert!(matches!(
            classify("connection refused".to_string()),
            ChainError::NetworkUnavailable(_)
        ));
    }

    #[test]
    fn classify_revert_extracts_reason() {
        let err = classify("execution reverted: already registered".to_string());
        match err {
            ChainError::ExecutionReverted(reason) => assert_eq!(reason, "already registered"),
            other => panic!("unexpected: {other}"),
        }
    }

    #[test]
    fn classify_revert_without_reason_keeps_message() {
        let err = classify("VM Exception: revert".to_string());
        match err {
            ChainError::ExecutionReverted(reason) => assert!(reason.contains("revert")),
            other => panic!("unexpected: {other}"),
        }
    }

    #[test]
    fn new_rejects_invalid_url() {
        assert!(matches!(
            EthereumClient::new("not a url"),
            Err(ChainError::Configuration(_))
        ));
    }

    #[tokio::test]
    async fn transaction_count_decodes_hex_nonce() {
        let server = MockServer::start().await;
        mock_rpc(&server, "eth_getTransactionCount", rpc_result(json!("0x5"))).await;

        let client = EthereumClient::new(&server.uri()).unwrap();
        let nonce = client.transaction_count(Address::zero()).await.unwrap();
        assert_eq!(nonce, 5);
    }

    #[tokio::test]
    async fn call_surfaces_revert_reason() {
        let server = MockServer::start().await;
        mock_rpc(
            &server,
            "eth_call",
            rpc_error("execution reverted: already registered"),
        )
        .await;

        let client = EthereumClient::new(&server.uri()).unwrap();
        let err = client
            .call(Address::zero(), Bytes::from(vec![0x01]))
            .await
            .unwrap_err();
        match err {
            ChainError::ExecutionReverted(reason) => {
                assert!(reason.contains("already registered"));
            }
            other => panic!("unexpected: {other}"),
        }
    }

    #[tokio::test]
    async fn call_returns_result_bytes() {
        let server = MockServer::start().await;
        mock_rpc(&server, "eth_call", rpc_result(json!("0xdeadbeef"))).await;

        let client = EthereumClient::new(&server.uri()).unwrap();
        let bytes = client
            .call(Address::zero(), Bytes::new())
            .await
            .unwrap();
        assert_eq!(bytes.to_vec(), vec![0xde, 0xad, 0xbe, 0xef]);
    }

    #[tokio::test]
    async fn send_raw_transaction_returns_hash() {
        let server = MockServer::start().await;
        let hash = H256::repeat_byte(0xab);
        mock_rpc(
            &server,
            "eth_sendRawTransaction",
            rpc_result(json!(format!("{hash:?}"))),
        )
        .await;

        let client = EthereumClient::new(&server.uri()).unwrap();
        let returned = client
            .send_raw_transaction(Bytes::from(vec![0xf8]))
            .await
            .unwrap();
        assert_eq!(returned, hash);
    }

    #[tokio::test]
    async fn send_raw_transaction_classifies_nonce_too_low() {
        let server = MockServer::start().await;
        mock_rpc(&server, "eth_sendRawTransaction", rpc_error("nonce too low")).await;

        let client = EthereumClient::new(&server.uri()).unwrap();
        let err = client
            .send_raw_transaction(Bytes::from(vec![0xf8]))
            .await
            .unwrap_err();
        assert!(matches!(err, ChainError::NonceTooLow));
        assert!(err.is_rejection());
    }

    #[tokio::test]
    async fn send_raw_transaction_classifies_underpriced() {
        let server = MockServer::start().await;
        mock_rpc(
            &server,
            "eth_sendRawTransaction",
            rpc_error("transaction underpriced"),
        )
        .await;

        let client = EthereumClient::new(&server.uri()).unwrap();
        let err = client
            .send_raw_transaction(Bytes::from(vec![0xf8]))
            .await
            .unwrap_err();
        assert!(matches!(err, ChainError::Underpriced));
    }

    #[tokio::test]
    async fn receipt_none_while_pending() {
        let server = MockServer::start().await;
        mock_rpc(&server, "eth_getTransactionReceipt", rpc_result(json!(null))).await;

        let client = EthereumClient::new(&server.uri()).unwrap();
        let receipt = client
            .transaction_receipt(H256::repeat_byte(0x01))
            .await
            .unwrap();
        assert!(receipt.is_none());
    }

    fn mined_receipt_json(status: &str, contract: Option<&str>) -> serde_json::Value {
        json!({
            "transactionHash": format!("{:?}", H256::repeat_byte(0x01)),
            "transactionIndex": "0x0",
            "blockHash": format!("{:?}", H256::repeat_byte(0x02)),
            "blockNumber": "0x64",
            "from": format!("{:?}", Address::repeat_byte(0x11)),
            "to": null,
            "cumulativeGasUsed": "0x5208",
            "gasUsed": "0x5208",
            "contractAddress": contract,
            "logs": [],
            "status": status,
            "logsBloom": format!("0x{}", "00".repeat(256)),
            "effectiveGasPrice": "0x3b9aca00",
        })
    }

    #[tokio::test]
    async fn receipt_converted_when_mined() {
        let server = MockServer::start().await;
        mock_rpc(
            &server,
            "eth_getTransactionReceipt",
            rpc_result(mined_receipt_json(
                "0x1",
                Some("0x5fbdb2315678afecb367f032d93f642f64180aa3"),
            )),
        )
        .await;

        let client = EthereumClient::new(&server.uri()).unwrap();
        let receipt = client
            .transaction_receipt(H256::repeat_byte(0x01))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(receipt.block_number, 100);
        assert_eq!(receipt.gas_used, 21_000);
        assert!(receipt.is_success());
        assert!(receipt.contract_address.is_some());
    }

    #[tokio::test]
    async fn receipt_failure_status() {
        let server = MockServer::start().await;
        mock_rpc(
            &server,
            "eth_getTransactionReceipt",
            rpc_result(mined_receipt_json("0x0", None)),
        )
        .await;

        let client = EthereumClient::new(&server.uri()).unwrap();
        let receipt = client
            .transaction_receipt(H256::repeat_byte(0x01))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(receipt.status, TxStatus::Failure);
    }

    #[test]
    fn pending_node_receipt_is_gated() {
        let mut raw: ethers::types::TransactionReceipt =
            serde_json::from_value(mined_receipt_json("0x1", None)).unwrap();
        raw.block_number = None;
        assert!(convert_receipt(raw).is_none());
    }
}
