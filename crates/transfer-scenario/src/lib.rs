//! Native-value transfer verification.
//!
//! ## Overview
//!
//! A [`TransferScenario`] sends a fixed amount from a pre-funded control account to a freshly
//! generated recipient, waits (bounded) for the transaction to be confirmed, and checks that the
//! sender and recipient balances moved exactly as the settlement law requires.
//!
//! ## Implementation
//!
//! The scenario only talks to the ledger through the [`Ledger`] trait. [`RpcLedger`] implements
//! it over Ethereum JSON-RPC with a locally held signing key.

/// Scenario and network configuration.
pub mod config;
/// Failure taxonomy.
pub mod error;
/// Fresh recipient identities.
pub mod identity;
/// The ledger contract.
pub mod ledger;
/// Run reports and verdicts.
pub mod report;
/// The JSON-RPC backed ledger.
pub mod rpc;
/// The verification scenario.
pub mod scenario;
/// The settlement law.
pub mod settlement;

pub use config::{ConfigError, NetworkConfig, ScenarioConfig};
pub use error::{AccountRole, FailureKind, Precondition, ScenarioError};
pub use identity::FreshIdentity;
pub use ledger::{ConfirmationReceipt, Ledger, LedgerError, PendingHandle, TransferIntent};
pub use report::{TransferReport, Verdict};
pub use rpc::RpcLedger;
pub use scenario::TransferScenario;
pub use settlement::FeeLaw;
