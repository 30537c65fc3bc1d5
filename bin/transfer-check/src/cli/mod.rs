use alloy_primitives::U256;
use clap::Parser;
use std::{str::FromStr, time::Duration};
use tracing_subscriber::{filter::ParseError, EnvFilter};
use transfer_scenario::{
    config::{DEFAULT_CONFIRMATIONS, DEFAULT_GAS_LIMIT},
    ConfigError, FeeLaw, NetworkConfig, ScenarioConfig,
};

#[derive(Debug, Parser)]
#[command(name = "transfer-check", version, about)]
pub struct Cli {
    #[command(flatten)]
    pub network: NetworkArgs,
    #[command(flatten)]
    pub scenario: ScenarioArgs,
    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Parser)]
pub struct LogArgs {
    #[clap(short, long, default_value = "info")]
    pub filter: String,
}

impl LogArgs {
    pub fn init_tracing(&self) -> Result<(), ParseError> {
        let filter = EnvFilter::builder().parse(&self.filter)?;
        tracing_subscriber::fmt().with_env_filter(filter).init();
        Ok(())
    }
}

#[derive(Debug, Parser)]
pub struct NetworkArgs {
    /// JSON-RPC endpoint of the ledger node
    #[arg(long, env = "JSON_RPC_ENDPOINT", default_value = "http://127.0.0.1:8545")]
    pub rpc_url: String,

    /// Hex encoded private key of the pre-funded control account
    #[arg(long, env = "CONTROL_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: String,

    /// Chain id used for replay protection, queried from the node when omitted
    #[arg(long, env = "CHAIN_ID")]
    pub chain_id: Option<u64>,

    /// Delay between two receipt polls
    #[arg(long, value_name = "MS", default_value = "500")]
    pub poll_interval_ms: u64,
}

impl NetworkArgs {
    pub fn to_config(&self) -> Result<NetworkConfig, ConfigError> {
        NetworkConfig::new(&self.rpc_url, &self.private_key)?
            .with_chain_id(self.chain_id)
            .with_poll_interval(Duration::from_millis(self.poll_interval_ms))
    }
}

#[derive(Debug, Parser)]
pub struct ScenarioArgs {
    /// Amount to transfer, in wei (decimal or 0x-prefixed hex)
    #[arg(long, value_name = "WEI", value_parser = parse_u256, default_value = "5000000000000000000")]
    pub amount: U256,

    #[arg(long, default_value_t = DEFAULT_GAS_LIMIT)]
    pub gas_limit: u64,

    /// Blocks, counting the inclusion block, to wait for before re-reading balances
    #[arg(long, default_value_t = DEFAULT_CONFIRMATIONS)]
    pub confirmations: u64,

    /// Upper bound on the confirmation wait
    #[arg(long, value_name = "MS", default_value = "10000")]
    pub timeout_ms: u64,

    /// Fee the sender is expected to pay: `zero`, `gas-used` or `fixed:<wei>`
    #[arg(long, default_value = "zero")]
    pub fee_law: FeeLaw,

    /// Number of sequential runs, each against a fresh recipient
    #[arg(long, default_value = "1")]
    pub runs: u32,

    /// Print verdicts as JSON lines
    #[arg(long)]
    pub json: bool,
}

impl ScenarioArgs {
    pub fn to_config(&self) -> Result<ScenarioConfig, ConfigError> {
        let config = ScenarioConfig {
            amount: self.amount,
            gas_limit: self.gas_limit,
            confirmations: self.confirmations,
            timeout: Duration::from_millis(self.timeout_ms),
            fee_law: self.fee_law,
            runs: self.runs,
        };
        config.validate()?;
        Ok(config)
    }
}

fn parse_u256(value: &str) -> Result<U256, String> {
    U256::from_str(value.trim()).map_err(|err| format!("invalid amount `{value}`: {err}"))
}
