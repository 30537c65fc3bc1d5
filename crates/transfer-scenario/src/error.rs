use crate::ledger::LedgerError;
use alloy_primitives::{Address, B256, U256};
use serde::Serialize;
use std::{fmt, time::Duration};
use thiserror::Error;

/// Which side of the transfer an observation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountRole {
    Sender,
    Recipient,
}

impl fmt::Display for AccountRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let role = match self {
            Self::Sender => "sender",
            Self::Recipient => "recipient",
        };
        write!(f, "{role}")
    }
}

/// The reportable reason a run failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FailureKind {
    PreconditionFailure,
    SubmissionError,
    ConfirmationTimeout,
    TransactionReverted,
    ConfirmationIncomplete,
    SettlementMismatch,
    /// The ledger could not be reached while reading balances or polling.
    LedgerUnavailable,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Self::PreconditionFailure => "PreconditionFailure",
            Self::SubmissionError => "SubmissionError",
            Self::ConfirmationTimeout => "ConfirmationTimeout",
            Self::TransactionReverted => "TransactionReverted",
            Self::ConfirmationIncomplete => "ConfirmationIncomplete",
            Self::SettlementMismatch => "SettlementMismatch",
            Self::LedgerUnavailable => "LedgerUnavailable",
        };
        write!(f, "{kind}")
    }
}

/// The environment is not in the state the scenario assumes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Precondition {
    #[error("sender {address} holds no balance")]
    SenderUnfunded { address: Address },
    #[error("recipient {address} already holds {balance}")]
    RecipientNotFresh { address: Address, balance: U256 },
}

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("precondition failed: {0}")]
    PreconditionFailure(#[from] Precondition),
    #[error("failed to read balance of {role} {address}: {source}")]
    BalanceQuery { role: AccountRole, address: Address, source: LedgerError },
    #[error("transfer submission failed: {0}")]
    Submission(#[source] LedgerError),
    #[error("transaction {tx_hash} not confirmed within {timeout:?}")]
    ConfirmationTimeout { tx_hash: B256, timeout: Duration },
    #[error("transaction {tx_hash} reverted in block {block_number:?}")]
    TransactionReverted { tx_hash: B256, block_number: Option<u64> },
    #[error("confirmation of {tx_hash} is missing the {missing}")]
    ConfirmationIncomplete { tx_hash: B256, missing: &'static str },
    #[error("waiting for confirmation failed: {0}")]
    Confirmation(#[source] LedgerError),
    #[error("{role} {address} settled at {observed}, expected {expected} (before transfer: {before})")]
    SettlementMismatch {
        role: AccountRole,
        address: Address,
        before: U256,
        expected: U256,
        observed: U256,
    },
    /// The ledger confirmed a transfer the sender could not cover.
    #[error("sender {address} was debited {debit} while holding only {balance}")]
    Overdraft { address: Address, balance: U256, debit: U256 },
}

impl ScenarioError {
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::PreconditionFailure(_) => FailureKind::PreconditionFailure,
            Self::Submission(_) => FailureKind::SubmissionError,
            Self::ConfirmationTimeout { .. } => FailureKind::ConfirmationTimeout,
            Self::TransactionReverted { .. } => FailureKind::TransactionReverted,
            Self::ConfirmationIncomplete { .. } => FailureKind::ConfirmationIncomplete,
            Self::SettlementMismatch { .. } | Self::Overdraft { .. } => {
                FailureKind::SettlementMismatch
            }
            Self::BalanceQuery { .. } | Self::Confirmation(_) => FailureKind::LedgerUnavailable,
        }
    }

    /// Maps a failed confirmation wait onto the scenario taxonomy.
    pub(crate) fn from_confirmation(err: LedgerError) -> Self {
        match err {
            LedgerError::ConfirmationTimeout { tx_hash, timeout } => {
                Self::ConfirmationTimeout { tx_hash, timeout }
            }
            LedgerError::Reverted { tx_hash, block_number } => {
                Self::TransactionReverted { tx_hash, block_number }
            }
            other => Self::Confirmation(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_kind_to_string() {
        assert_eq!(FailureKind::PreconditionFailure.to_string(), "PreconditionFailure");
        assert_eq!(FailureKind::SubmissionError.to_string(), "SubmissionError");
        assert_eq!(FailureKind::ConfirmationTimeout.to_string(), "ConfirmationTimeout");
        assert_eq!(FailureKind::TransactionReverted.to_string(), "TransactionReverted");
        assert_eq!(FailureKind::ConfirmationIncomplete.to_string(), "ConfirmationIncomplete");
        assert_eq!(FailureKind::SettlementMismatch.to_string(), "SettlementMismatch");
        assert_eq!(FailureKind::LedgerUnavailable.to_string(), "LedgerUnavailable");
    }

    #[test]
    fn test_confirmation_errors_keep_their_kind() {
        let tx_hash = B256::repeat_byte(0xab);

        let timeout = ScenarioError::from_confirmation(LedgerError::ConfirmationTimeout {
            tx_hash,
            timeout: Duration::from_secs(10),
        });
        assert_eq!(timeout.kind(), FailureKind::ConfirmationTimeout);

        let reverted = ScenarioError::from_confirmation(LedgerError::Reverted {
            tx_hash,
            block_number: Some(12),
        });
        assert_eq!(reverted.kind(), FailureKind::TransactionReverted);

        let other = ScenarioError::from_confirmation(LedgerError::Rejected("gone".to_string()));
        assert_eq!(other.kind(), FailureKind::LedgerUnavailable);
    }

    #[test]
    fn test_overdraft_is_a_settlement_mismatch() {
        let err = ScenarioError::Overdraft {
            address: Address::ZERO,
            balance: U256::from(1),
            debit: U256::from(2),
        };
        assert_eq!(err.kind(), FailureKind::SettlementMismatch);
    }

    #[test]
    fn test_settlement_mismatch_message_carries_values() {
        let err = ScenarioError::SettlementMismatch {
            role: AccountRole::Recipient,
            address: Address::ZERO,
            before: U256::ZERO,
            expected: U256::from(5),
            observed: U256::from(4),
        };
        let message = err.to_string();

        assert!(message.starts_with("recipient 0x0000000000000000000000000000000000000000"));
        assert!(message.contains("settled at 4, expected 5"));
    }
}
