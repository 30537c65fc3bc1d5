//! The ledger contract consumed by the scenario.

use alloy_primitives::{Address, B256, U256};
use async_trait::async_trait;
use ledger_sdk::error::LedgerSdkError;
use std::time::Duration;
use thiserror::Error;

/// A native-value transfer, built once and submitted once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferIntent {
    sender: Address,
    recipient: Address,
    amount: U256,
    gas_limit: u64,
}

impl TransferIntent {
    pub const fn new(sender: Address, recipient: Address, amount: U256, gas_limit: u64) -> Self {
        Self { sender, recipient, amount, gas_limit }
    }

    pub const fn sender(&self) -> Address {
        self.sender
    }

    pub const fn recipient(&self) -> Address {
        self.recipient
    }

    pub const fn amount(&self) -> U256 {
        self.amount
    }

    pub const fn gas_limit(&self) -> u64 {
        self.gas_limit
    }
}

/// A broadcast transaction whose inclusion has not been observed yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingHandle {
    tx_hash: B256,
}

impl PendingHandle {
    pub const fn new(tx_hash: B256) -> Self {
        Self { tx_hash }
    }

    pub const fn tx_hash(&self) -> B256 {
        self.tx_hash
    }
}

/// What the ledger reports once a transaction has reached the requested depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationReceipt {
    pub tx_hash: B256,
    /// The inclusion marker. A receipt without it does not prove inclusion.
    pub block_hash: Option<B256>,
    pub block_number: Option<u64>,
    pub gas_used: Option<u64>,
    pub effective_gas_price: Option<U256>,
}

#[derive(Debug, Error)]
pub enum LedgerError {
    /// The intent was malformed or the network refused to accept it.
    #[error("transfer rejected: {0}")]
    Rejected(String),
    #[error("transaction {tx_hash} not confirmed within {timeout:?}")]
    ConfirmationTimeout { tx_hash: B256, timeout: Duration },
    /// The transaction was included but its execution failed.
    #[error("transaction {tx_hash} reverted in block {block_number:?}")]
    Reverted { tx_hash: B256, block_number: Option<u64> },
    #[error(transparent)]
    Sdk(#[from] LedgerSdkError),
}

/// Balance lookup and transaction submission against a remote ledger.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Latest confirmed balance of `address`. Never served from a cache.
    async fn get_balance(&self, address: Address) -> Result<U256, LedgerError>;

    /// Signs and broadcasts `intent`.
    async fn submit_transfer(&self, intent: &TransferIntent) -> Result<PendingHandle, LedgerError>;

    /// Suspends until `handle` is at least `confirmations` blocks deep, or fails with
    /// [`LedgerError::ConfirmationTimeout`] once `timeout` has elapsed.
    async fn await_confirmation(
        &self,
        handle: &PendingHandle,
        confirmations: u64,
        timeout: Duration,
    ) -> Result<ConfirmationReceipt, LedgerError>;
}
