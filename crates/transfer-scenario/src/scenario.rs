//! The transfer verification scenario.

use crate::{
    config::ScenarioConfig,
    error::{AccountRole, Precondition, ScenarioError},
    identity::FreshIdentity,
    ledger::{Ledger, TransferIntent},
    report::{TransferReport, Verdict},
    settlement::expected_balances,
};
use alloy_primitives::{Address, U256};

/// Moves a fixed amount from the control account to a fresh recipient and checks that
/// both balances moved exactly as the settlement law requires.
///
/// A run makes exactly one transfer attempt. Every failure is terminal: retrying a timed out
/// or mis-settled transfer would hide the defect the scenario exists to detect.
#[derive(Debug)]
pub struct TransferScenario<'a, L: ?Sized> {
    ledger: &'a L,
    sender: Address,
    config: &'a ScenarioConfig,
}

impl<'a, L: Ledger + ?Sized> TransferScenario<'a, L> {
    pub const fn new(ledger: &'a L, sender: Address, config: &'a ScenarioConfig) -> Self {
        Self { ledger, sender, config }
    }

    /// Runs the scenario against a newly generated recipient.
    pub async fn run(&self) -> Result<TransferReport, ScenarioError> {
        self.run_with_recipient(FreshIdentity::generate()).await
    }

    /// Runs the scenario `config.runs` times in sequence, each with its own recipient.
    ///
    /// `on_run` sees the verdict of every run as soon as it is known. Stops at the first
    /// failing run and returns its error together with the 1-based index of that run.
    pub async fn run_all<F>(
        &self,
        mut on_run: F,
    ) -> Result<Vec<TransferReport>, (u32, ScenarioError)>
    where
        F: FnMut(&Verdict),
    {
        let mut reports = Vec::with_capacity(self.config.runs as usize);
        for run in 1..=self.config.runs {
            tracing::info!(target: "transfer::scenario", run, runs = self.config.runs, "Starting run");
            let outcome = self.run().await;
            on_run(&Verdict::new(run, &outcome));
            reports.push(outcome.map_err(|err| (run, err))?);
        }
        Ok(reports)
    }

    pub async fn run_with_recipient(
        &self,
        recipient: FreshIdentity,
    ) -> Result<TransferReport, ScenarioError> {
        let recipient = recipient.address();
        let amount = self.config.amount;

        // Read the starting balances and check the environment is what we expect.
        let sender_before = self.balance(AccountRole::Sender, self.sender).await?;
        let recipient_before = self.balance(AccountRole::Recipient, recipient).await?;

        if sender_before.is_zero() {
            return Err(Precondition::SenderUnfunded { address: self.sender }.into());
        }
        if !recipient_before.is_zero() {
            return Err(
                Precondition::RecipientNotFresh { address: recipient, balance: recipient_before }
                    .into(),
            );
        }

        tracing::info!(
            target: "transfer::scenario",
            sender = %self.sender,
            %recipient,
            %sender_before,
            %amount,
            gas_limit = self.config.gas_limit,
            "Submitting transfer"
        );

        // Submit the transfer and wait for it to settle.
        let intent = TransferIntent::new(self.sender, recipient, amount, self.config.gas_limit);
        let handle = self.ledger.submit_transfer(&intent).await.map_err(ScenarioError::Submission)?;

        let receipt = self
            .ledger
            .await_confirmation(&handle, self.config.confirmations, self.config.timeout)
            .await
            .map_err(ScenarioError::from_confirmation)?;

        let block_hash = receipt.block_hash.ok_or(ScenarioError::ConfirmationIncomplete {
            tx_hash: handle.tx_hash(),
            missing: "block hash",
        })?;

        tracing::info!(
            target: "transfer::scenario",
            tx_hash = %handle.tx_hash(),
            %block_hash,
            block_number = ?receipt.block_number,
            "Transfer confirmed"
        );

        // Read the final balances and hold them against the settlement law.
        let sender_after = self.balance(AccountRole::Sender, self.sender).await?;
        let recipient_after = self.balance(AccountRole::Recipient, recipient).await?;

        let fee = self.config.fee_law.fee(&receipt)?;
        let expected = expected_balances(sender_before, recipient_before, amount, fee).ok_or(
            ScenarioError::Overdraft {
                address: self.sender,
                balance: sender_before,
                debit: amount.saturating_add(fee),
            },
        )?;

        if sender_after != expected.sender {
            return Err(ScenarioError::SettlementMismatch {
                role: AccountRole::Sender,
                address: self.sender,
                before: sender_before,
                expected: expected.sender,
                observed: sender_after,
            });
        }
        if recipient_after != expected.recipient {
            return Err(ScenarioError::SettlementMismatch {
                role: AccountRole::Recipient,
                address: recipient,
                before: recipient_before,
                expected: expected.recipient,
                observed: recipient_after,
            });
        }

        tracing::info!(
            target: "transfer::scenario",
            %sender_after,
            %recipient_after,
            %fee,
            "Settlement verified"
        );

        Ok(TransferReport {
            sender: self.sender,
            recipient,
            amount,
            fee,
            tx_hash: handle.tx_hash(),
            block_hash,
            block_number: receipt.block_number,
            sender_before,
            sender_after,
            recipient_before,
            recipient_after,
        })
    }

    async fn balance(&self, role: AccountRole, address: Address) -> Result<U256, ScenarioError> {
        self.ledger
            .get_balance(address)
            .await
            .map_err(|source| ScenarioError::BalanceQuery { role, address, source })
    }
}
