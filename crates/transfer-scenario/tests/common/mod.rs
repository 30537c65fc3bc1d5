// In-memory ledger used by the scenario integration tests.

#![allow(dead_code, unreachable_pub)]

use alloy_primitives::{Address, B256, U256};
use async_trait::async_trait;
use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
    time::Duration,
};
use transfer_scenario::{ConfirmationReceipt, Ledger, LedgerError, PendingHandle, TransferIntent};

/// How the mock ledger treats submitted transfers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    /// Settle correctly, charging `gas_used * gas_price` on top of the amount.
    Settle { gas_used: u64, gas_price: U256 },
    /// Accept the transaction but never include it.
    NeverConfirm,
    /// Settle but report a receipt without a block hash.
    OmitBlockHash,
    /// Refuse every submission.
    Reject,
    /// Credit the recipient `skim` less than the transferred amount.
    Skim(U256),
    /// Every address the mock has never seen already holds this balance.
    DirtyRecipients(U256),
}

impl Behavior {
    pub const fn zero_fee() -> Self {
        Self::Settle { gas_used: 0, gas_price: U256::ZERO }
    }
}

#[derive(Debug, Default)]
pub struct State {
    pub balances: HashMap<Address, U256>,
    pub pending: HashMap<B256, TransferIntent>,
    pub block: u64,
    pub balance_reads: usize,
    pub submissions: usize,
    pub last_confirmations: Option<u64>,
    pub last_timeout: Option<Duration>,
}

#[derive(Debug)]
pub struct MockLedger {
    behavior: Behavior,
    state: Mutex<State>,
}

impl MockLedger {
    pub fn new(behavior: Behavior) -> Self {
        Self { behavior, state: Mutex::new(State::default()) }
    }

    pub fn with_balance(self, address: Address, balance: U256) -> Self {
        self.state().balances.insert(address, balance);
        self
    }

    pub fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    pub fn balance_of(&self, address: Address) -> U256 {
        self.state().balances.get(&address).copied().unwrap_or_default()
    }
}

#[async_trait]
impl Ledger for MockLedger {
    async fn get_balance(&self, address: Address) -> Result<U256, LedgerError> {
        let mut state = self.state();
        state.balance_reads += 1;
        let default = match self.behavior {
            Behavior::DirtyRecipients(balance) => balance,
            _ => U256::ZERO,
        };
        Ok(state.balances.get(&address).copied().unwrap_or(default))
    }

    async fn submit_transfer(&self, intent: &TransferIntent) -> Result<PendingHandle, LedgerError> {
        if self.behavior == Behavior::Reject {
            return Err(LedgerError::Rejected("intrinsic gas too low".to_string()));
        }

        let mut state = self.state();
        state.submissions += 1;
        let tx_hash = B256::left_padding_from(&(state.submissions as u64).to_be_bytes());
        state.pending.insert(tx_hash, intent.clone());
        Ok(PendingHandle::new(tx_hash))
    }

    async fn await_confirmation(
        &self,
        handle: &PendingHandle,
        confirmations: u64,
        timeout: Duration,
    ) -> Result<ConfirmationReceipt, LedgerError> {
        {
            let mut state = self.state();
            state.last_confirmations = Some(confirmations);
            state.last_timeout = Some(timeout);
        }

        let tx_hash = handle.tx_hash();
        if self.behavior == Behavior::NeverConfirm {
            tokio::time::sleep(timeout).await;
            return Err(LedgerError::ConfirmationTimeout { tx_hash, timeout });
        }

        let (gas_used, gas_price) = match self.behavior {
            Behavior::Settle { gas_used, gas_price } => (gas_used, gas_price),
            _ => (0, U256::ZERO),
        };
        let fee = U256::from(gas_used) * gas_price;

        let mut state = self.state();
        let intent = state.pending.remove(&tx_hash).expect("unknown transaction");
        state.block += 1;
        let block_number = state.block;

        let sender_balance = state.balances.get(&intent.sender()).copied().unwrap_or_default();
        if sender_balance < intent.amount() + fee {
            return Err(LedgerError::Reverted { tx_hash, block_number: Some(block_number) });
        }

        let credited = match self.behavior {
            Behavior::Skim(skim) => intent.amount() - skim,
            _ => intent.amount(),
        };
        state.balances.insert(intent.sender(), sender_balance - intent.amount() - fee);
        *state.balances.entry(intent.recipient()).or_default() += credited;

        let block_hash = match self.behavior {
            Behavior::OmitBlockHash => None,
            _ => Some(B256::left_padding_from(&block_number.to_be_bytes())),
        };

        Ok(ConfirmationReceipt {
            tx_hash,
            block_hash,
            block_number: Some(block_number),
            gas_used: Some(gas_used),
            effective_gas_price: Some(gas_price),
        })
    }
}
