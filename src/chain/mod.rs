//! # Chain Clients
//!
//! JSON-RPC facade over the network.
//!
//! ## Available Components
//!
//! - [`ChainClient`]: trait for the four network operations the
//!   transaction lifecycle depends on
//! - [`EthereumClient`]: HTTP JSON-RPC implementation
//! - [`Receipt`] / [`TxStatus`] / [`LogEntry`]: mined-transaction
//!   outcome types

pub mod client;
pub mod ethereum;

pub use client::{ChainClient, LogEntry, Receipt, TxStatus};
pub use ethereum::EthereumClient;
