//! The settlement law: what balances a correct ledger must show after a transfer.
//!
//! Whether the sender pays for gas on top of the transferred amount is configurable. The
//! ledger under test currently deducts nothing, which may be a ledger defect rather than
//! intended behaviour, so the fee term is a [`FeeLaw`] instead of a constant.

use crate::{error::ScenarioError, ledger::ConfirmationReceipt};
use alloy_primitives::U256;
use std::{fmt, str::FromStr};

/// How much the sender is expected to pay on top of the transferred amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FeeLaw {
    /// No fee is deducted.
    #[default]
    Zero,
    /// `gas_used * effective_gas_price`, both taken from the receipt.
    GasUsed,
    /// A constant fee, in wei.
    Fixed(U256),
}

impl FeeLaw {
    /// The fee the sender should have paid for the transaction behind `receipt`.
    pub fn fee(&self, receipt: &ConfirmationReceipt) -> Result<U256, ScenarioError> {
        match self {
            Self::Zero => Ok(U256::ZERO),
            Self::Fixed(fee) => Ok(*fee),
            Self::GasUsed => {
                let gas_used = receipt.gas_used.ok_or(ScenarioError::ConfirmationIncomplete {
                    tx_hash: receipt.tx_hash,
                    missing: "gas used",
                })?;
                let price =
                    receipt.effective_gas_price.ok_or(ScenarioError::ConfirmationIncomplete {
                        tx_hash: receipt.tx_hash,
                        missing: "effective gas price",
                    })?;
                Ok(U256::from(gas_used).saturating_mul(price))
            }
        }
    }
}

impl fmt::Display for FeeLaw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zero => write!(f, "zero"),
            Self::GasUsed => write!(f, "gas-used"),
            Self::Fixed(fee) => write!(f, "fixed:{fee}"),
        }
    }
}

/// Error returned when a fee law cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid fee law `{0}`, expected `zero`, `gas-used` or `fixed:<wei>`")]
pub struct ParseFeeLawError(pub String);

impl FromStr for FeeLaw {
    type Err = ParseFeeLawError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "zero" => Ok(Self::Zero),
            "gas-used" => Ok(Self::GasUsed),
            other => other
                .strip_prefix("fixed:")
                .filter(|fee| !fee.is_empty())
                .and_then(|fee| U256::from_str(fee).ok())
                .map(Self::Fixed)
                .ok_or_else(|| ParseFeeLawError(s.to_string())),
        }
    }
}

/// Balances a correct ledger must report after the transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expectation {
    pub sender: U256,
    pub recipient: U256,
}

/// Applies the settlement law.
///
/// Returns `None` when the sender could not have covered `amount + fee`, i.e. any
/// confirmed transfer would have overdrawn the account.
pub fn expected_balances(
    sender_before: U256,
    recipient_before: U256,
    amount: U256,
    fee: U256,
) -> Option<Expectation> {
    let debit = amount.checked_add(fee)?;
    Some(Expectation {
        sender: sender_before.checked_sub(debit)?,
        recipient: recipient_before.checked_add(amount)?,
    })
}
