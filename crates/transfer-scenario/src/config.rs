//! Explicit configuration handed to the scenario and to the RPC ledger.

use crate::settlement::FeeLaw;
use alloy_primitives::U256;
use ledger_sdk::{error::LedgerSdkError, signer::LocalSigner};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// 5e12 * 1e6, i.e. five native coins with 18 decimals.
pub const DEFAULT_AMOUNT: U256 = U256::from_limbs([5_000_000_000_000_000_000, 0, 0, 0]);

/// Enough for a plain value transfer, which costs 21 000 gas on EVM ledgers.
pub const DEFAULT_GAS_LIMIT: u64 = 100_000;

pub const DEFAULT_CONFIRMATIONS: u64 = 1;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Endpoint(#[from] url::ParseError),
    #[error("invalid control account key: {0}")]
    ControlKey(#[source] LedgerSdkError),
    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),
}

/// Parameters of one verification run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioConfig {
    /// Value moved from the control account to the fresh recipient, in wei.
    pub amount: U256,
    pub gas_limit: u64,
    /// Minimum depth, counting the inclusion block, before balances are re-read.
    pub confirmations: u64,
    /// Upper bound on the confirmation wait.
    pub timeout: Duration,
    pub fee_law: FeeLaw,
    /// How many times to repeat the scenario, sequentially, against the same control account.
    pub runs: u32,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            amount: DEFAULT_AMOUNT,
            gas_limit: DEFAULT_GAS_LIMIT,
            confirmations: DEFAULT_CONFIRMATIONS,
            timeout: DEFAULT_TIMEOUT,
            fee_law: FeeLaw::default(),
            runs: 1,
        }
    }
}

impl ScenarioConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.amount.is_zero() {
            return Err(ConfigError::NotPositive("amount"));
        }
        if self.gas_limit == 0 {
            return Err(ConfigError::NotPositive("gas limit"));
        }
        if self.confirmations == 0 {
            return Err(ConfigError::NotPositive("confirmations"));
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::NotPositive("timeout"));
        }
        if self.runs == 0 {
            return Err(ConfigError::NotPositive("runs"));
        }
        Ok(())
    }
}

/// Where the ledger lives and which account pays for the transfer.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    pub endpoint: Url,
    /// Signing key of the pre-funded control account.
    pub signer: LocalSigner,
    /// Queried from the node when unset.
    pub chain_id: Option<u64>,
    pub poll_interval: Duration,
}

impl NetworkConfig {
    pub fn new(endpoint: &str, private_key: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            endpoint: Url::parse(endpoint)?,
            signer: LocalSigner::from_hex(private_key).map_err(ConfigError::ControlKey)?,
            chain_id: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
        })
    }

    #[must_use]
    pub const fn with_chain_id(mut self, chain_id: Option<u64>) -> Self {
        self.chain_id = chain_id;
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Result<Self, ConfigError> {
        if poll_interval.is_zero() {
            return Err(ConfigError::NotPositive("poll interval"));
        }
        self.poll_interval = poll_interval;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    const HARDHAT_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn test_default_scenario_config() {
        let config = ScenarioConfig::default();

        assert_eq!(config.amount, U256::from(5_000_000_000_000u64) * U256::from(1_000_000u64));
        assert_eq!(config.gas_limit, 100_000);
        assert_eq!(config.confirmations, 1);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.fee_law, FeeLaw::Zero);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_scenario_config_rejects_zero_values() {
        let cases = [
            (ScenarioConfig { amount: U256::ZERO, ..Default::default() }, "amount"),
            (ScenarioConfig { gas_limit: 0, ..Default::default() }, "gas limit"),
            (ScenarioConfig { confirmations: 0, ..Default::default() }, "confirmations"),
            (ScenarioConfig { timeout: Duration::ZERO, ..Default::default() }, "timeout"),
            (ScenarioConfig { runs: 0, ..Default::default() }, "runs"),
        ];

        for (config, field) in cases {
            match config.validate() {
                Err(ConfigError::NotPositive(name)) => assert_eq!(name, field),
                other => panic!("expected {field} to be rejected, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_network_config() {
        let config = NetworkConfig::new("http://localhost:8545", HARDHAT_KEY)
            .unwrap()
            .with_chain_id(Some(31337))
            .with_poll_interval(Duration::from_millis(100))
            .unwrap();

        assert_eq!(config.endpoint.as_str(), "http://localhost:8545/");
        assert_eq!(config.signer.address(), address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266"));
        assert_eq!(config.chain_id, Some(31337));
        assert_eq!(config.poll_interval, Duration::from_millis(100));
    }

    #[test]
    fn test_network_config_errors() {
        assert!(matches!(
            NetworkConfig::new("::not a url::", HARDHAT_KEY),
            Err(ConfigError::Endpoint(_))
        ));
        assert!(matches!(
            NetworkConfig::new("http://localhost:8545", "0x1234"),
            Err(ConfigError::ControlKey(_))
        ));

        let config = NetworkConfig::new("http://localhost:8545", HARDHAT_KEY).unwrap();
        assert!(matches!(
            config.with_poll_interval(Duration::ZERO),
            Err(ConfigError::NotPositive("poll interval"))
        ));
    }
}
