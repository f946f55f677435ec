//! # Configuration
//!
//! Process configuration loaded once at startup.
//!
//! Settings come from `CHAINWRIGHT_*` environment variables, with a
//! `.env` file loaded first via [`dotenvy`]. Nothing is mutated after
//! loading; components receive the values they need through their
//! constructors.

use ethers::types::{Address, U256};
use serde::Deserialize;
use std::time::Duration;

use crate::error::{ChainError, ChainResult};

/// Sepolia test network chain id.
pub const DEFAULT_CHAIN_ID: u64 = 11_155_111;

const fn default_chain_id() -> u64 {
    DEFAULT_CHAIN_ID
}

const fn default_gas_price_gwei() -> u64 {
    10
}

const fn default_deploy_gas_limit() -> u64 {
    2_000_000
}

const fn default_invoke_gas_limit() -> u64 {
    300_000
}

const fn default_poll_interval_ms() -> u64 {
    2_000
}

const fn default_confirm_timeout_ms() -> u64 {
    120_000
}

/// Process settings.
///
/// Loaded from the environment; see the `CHAINWRIGHT_*` variables in
/// [`Settings::load`].
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// JSON-RPC endpoint URL.
    pub rpc_url: String,
    /// Hex-encoded 32-byte private key, with or without `0x` prefix.
    pub private_key: String,
    /// Deployed contract address, required for `invoke` unless passed
    /// on the command line.
    #[serde(default)]
    pub contract_address: Option<String>,
    /// Chain id for replay protection.
    #[serde(default = "default_chain_id")]
    pub chain_id: u64,
    /// Gas price in gwei for all transactions.
    #[serde(default = "default_gas_price_gwei")]
    pub gas_price_gwei: u64,
    /// Gas limit for contract creation transactions.
    #[serde(default = "default_deploy_gas_limit")]
    pub deploy_gas_limit: u64,
    /// Gas limit for state-changing invocations.
    #[serde(default = "default_invoke_gas_limit")]
    pub invoke_gas_limit: u64,
    /// Receipt poll interval in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Overall confirmation timeout in milliseconds.
    #[serde(default = "default_confirm_timeout_ms")]
    pub confirm_timeout_ms: u64,
}

impl Settings {
    /// Loads settings from the environment.
    ///
    /// Reads `.env` from the working directory if present, then binds
    /// `CHAINWRIGHT_RPC_URL`, `CHAINWRIGHT_PRIVATE_KEY`,
    /// `CHAINWRIGHT_CONTRACT_ADDRESS`, `CHAINWRIGHT_CHAIN_ID`,
    /// `CHAINWRIGHT_GAS_PRICE_GWEI`, `CHAINWRIGHT_DEPLOY_GAS_LIMIT`,
    /// `CHAINWRIGHT_INVOKE_GAS_LIMIT`, `CHAINWRIGHT_POLL_INTERVAL_MS`,
    /// and `CHAINWRIGHT_CONFIRM_TIMEOUT_MS`.
    ///
    /// # Errors
    ///
    /// Returns `ChainError::Configuration` if a required variable is
    /// missing or a value cannot be parsed.
    pub fn load() -> ChainResult<Self> {
        dotenvy::dotenv().ok();

        let cfg = config::Config::builder()
            .add_source(config::Environment::with_prefix("CHAINWRIGHT").try_parsing(true))
            .build()
            .map_err(|e| ChainError::configuration(e.to_string()))?;

        cfg.try_deserialize()
            .map_err(|e| ChainError::configuration(e.to_string()))
    }

    /// Returns the gas price converted to wei.
    #[must_use]
    pub fn gas_price_wei(&self) -> U256 {
        U256::from(self.gas_price_gwei) * U256::exp10(9)
    }

    /// Returns the receipt poll interval.
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Returns the confirmation timeout.
    #[must_use]
    pub const fn confirm_timeout(&self) -> Duration {
        Duration::from_millis(self.confirm_timeout_ms)
    }

    /// Parses the configured contract address.
    ///
    /// # Errors
    ///
    /// Returns `ChainError::Configuration` if the address is absent or
    /// not a valid 20-byte hex address.
    pub fn parse_contract_address(&self) -> ChainResult<Address> {
        let raw = self
            .contract_address
            .as_deref()
            .ok_or_else(|| ChainError::configuration("contract address not configured"))?;
        raw.parse()
            .map_err(|_| ChainError::configuration(format!("invalid contract address: {raw}")))
    }
}
