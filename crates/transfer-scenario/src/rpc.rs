//! [`Ledger`] backed by a JSON-RPC node and a locally held control key.

use crate::{
    config::NetworkConfig,
    ledger::{ConfirmationReceipt, Ledger, LedgerError, PendingHandle, TransferIntent},
};
use alloy_primitives::{Address, Bytes, B256, U256};
use async_trait::async_trait;
use ledger_sdk::{
    client::JsonRpcClient, error::LedgerSdkError, methods::BlockTag, model::TransactionReceipt,
    signer::LocalSigner, transaction::LegacyTransaction,
};
use std::time::Duration;
use tokio::time::MissedTickBehavior;

/// Number of blocks a transaction included at `included` has once the chain head is `head`.
///
/// The inclusion block itself counts as the first confirmation.
pub(crate) const fn confirmation_depth(head: u64, included: u64) -> u64 {
    if head < included {
        0
    } else {
        head - included + 1
    }
}

/// A node answering with an error object refused the transfer; anything else is transport.
fn submission_error(err: LedgerSdkError) -> LedgerError {
    if err.is_rpc_rejection() {
        LedgerError::Rejected(err.to_string())
    } else {
        LedgerError::Sdk(err)
    }
}

impl From<TransactionReceipt> for ConfirmationReceipt {
    fn from(receipt: TransactionReceipt) -> Self {
        Self {
            tx_hash: receipt.transaction_hash,
            block_hash: receipt.block_hash,
            block_number: receipt.block_number(),
            gas_used: receipt.gas_used(),
            effective_gas_price: receipt.effective_gas_price,
        }
    }
}

#[derive(Debug)]
pub struct RpcLedger {
    client: JsonRpcClient,
    signer: LocalSigner,
    chain_id: Option<u64>,
    poll_interval: Duration,
}

impl RpcLedger {
    pub fn new(config: &NetworkConfig) -> Self {
        Self {
            client: JsonRpcClient::new(config.endpoint.clone()),
            signer: config.signer.clone(),
            chain_id: config.chain_id,
            poll_interval: config.poll_interval,
        }
    }

    /// The address of the control account, i.e. the only sender this ledger can sign for.
    pub const fn control_address(&self) -> Address {
        self.signer.address()
    }

    async fn chain_id(&self) -> Result<u64, LedgerError> {
        match self.chain_id {
            Some(chain_id) => Ok(chain_id),
            None => self.client.chain_id().await.map_err(submission_error),
        }
    }

    /// Polls until the receipt of `tx_hash` exists and is `confirmations` blocks deep.
    ///
    /// Transient RPC failures are logged and retried; the caller bounds the wait.
    async fn wait_for_receipt(
        &self,
        tx_hash: B256,
        confirmations: u64,
    ) -> Result<ConfirmationReceipt, LedgerError> {
        let mut interval = tokio::time::interval(self.poll_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // Wait for the transaction to be included. A receipt without a block number
        // cannot be measured for depth, so it counts as pending.
        let (receipt, included) = loop {
            interval.tick().await;
            match self.client.get_transaction_receipt(tx_hash).await {
                Ok(Some(receipt)) => match receipt.block_number() {
                    Some(included) => break (receipt, included),
                    None => tracing::debug!(
                        target: "transfer::rpc",
                        %tx_hash,
                        "Receipt has no block number yet"
                    ),
                },
                Ok(None) => tracing::debug!(target: "transfer::rpc", %tx_hash, "Transaction pending"),
                Err(err) => {
                    tracing::warn!(target: "transfer::rpc", %tx_hash, %err, "Receipt query failed");
                }
            }
        };

        if receipt.succeeded() == Some(false) {
            return Err(LedgerError::Reverted { tx_hash, block_number: Some(included) });
        }

        // Wait for the inclusion block to be buried deep enough.
        loop {
            match self.client.block_number().await {
                Ok(head) if confirmation_depth(head, included) >= confirmations => break,
                Ok(head) => tracing::debug!(
                    target: "transfer::rpc",
                    %tx_hash,
                    head,
                    included,
                    confirmations,
                    "Waiting for confirmations"
                ),
                Err(err) => {
                    tracing::warn!(target: "transfer::rpc", %tx_hash, %err, "Block number query failed");
                }
            }
            interval.tick().await;
        }

        Ok(receipt.into())
    }
}

#[async_trait]
impl Ledger for RpcLedger {
    async fn get_balance(&self, address: Address) -> Result<U256, LedgerError> {
        Ok(self.client.get_balance(address, BlockTag::Latest).await?)
    }

    async fn submit_transfer(&self, intent: &TransferIntent) -> Result<PendingHandle, LedgerError> {
        if intent.sender() != self.signer.address() {
            return Err(LedgerError::Rejected(format!(
                "intent sender {} is not the control account {}",
                intent.sender(),
                self.signer.address()
            )));
        }

        // Gather the fields the node does not fill in for raw transactions.
        let nonce = self
            .client
            .get_transaction_count(intent.sender(), BlockTag::Pending)
            .await
            .map_err(submission_error)?;
        let gas_price = self.client.gas_price().await.map_err(submission_error)?;
        let chain_id = self.chain_id().await?;

        let tx = LegacyTransaction {
            chain_id,
            nonce,
            gas_price,
            gas_limit: intent.gas_limit(),
            to: intent.recipient(),
            value: intent.amount(),
            input: Bytes::new(),
        };

        // Sign locally and broadcast.
        let raw = self.signer.sign_transaction(&tx)?;
        let tx_hash = self.client.send_raw_transaction(&raw).await.map_err(submission_error)?;

        tracing::info!(
            target: "transfer::rpc",
            %tx_hash,
            nonce,
            %gas_price,
            chain_id,
            "Transfer broadcast"
        );

        Ok(PendingHandle::new(tx_hash))
    }

    async fn await_confirmation(
        &self,
        handle: &PendingHandle,
        confirmations: u64,
        timeout: Duration,
    ) -> Result<ConfirmationReceipt, LedgerError> {
        let tx_hash = handle.tx_hash();
        tokio::time::timeout(timeout, self.wait_for_receipt(tx_hash, confirmations))
            .await
            .map_err(|_| LedgerError::ConfirmationTimeout { tx_hash, timeout })?
    }
}
