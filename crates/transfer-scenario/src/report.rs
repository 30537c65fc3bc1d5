use crate::error::{FailureKind, ScenarioError};
use alloy_primitives::{Address, B256, U256};
use serde::Serialize;
use std::fmt;

/// Everything observed during a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferReport {
    pub sender: Address,
    pub recipient: Address,
    pub amount: U256,
    /// The fee charged under the configured fee law.
    pub fee: U256,
    pub tx_hash: B256,
    pub block_hash: B256,
    pub block_number: Option<u64>,
    pub sender_before: U256,
    pub sender_after: U256,
    pub recipient_before: U256,
    pub recipient_after: U256,
}

/// The pass/fail outcome of one run, as reported to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "lowercase")]
pub enum Verdict {
    Pass { run: u32, report: TransferReport },
    Fail { run: u32, kind: FailureKind, reason: String },
}

impl Verdict {
    pub fn new(run: u32, outcome: &Result<TransferReport, ScenarioError>) -> Self {
        match outcome {
            Ok(report) => Self::Pass { run, report: report.clone() },
            Err(err) => Self::Fail { run, kind: err.kind(), reason: err.to_string() },
        }
    }

    pub const fn is_pass(&self) -> bool {
        matches!(self, Self::Pass { .. })
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass { run, report } => write!(
                f,
                "PASS run {run}: {} -> {} amount {} fee {} in tx {}",
                report.sender, report.recipient, report.amount, report.fee, report.tx_hash
            ),
            Self::Fail { run, kind, reason } => write!(f, "FAIL run {run} [{kind}]: {reason}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Precondition;
    use serde_json::json;

    fn report() -> TransferReport {
        TransferReport {
            sender: Address::repeat_byte(0x11),
            recipient: Address::repeat_byte(0x22),
            amount: U256::from(5),
            fee: U256::ZERO,
            tx_hash: B256::repeat_byte(0x33),
            block_hash: B256::repeat_byte(0x44),
            block_number: Some(9),
            sender_before: U256::from(10),
            sender_after: U256::from(5),
            recipient_before: U256::ZERO,
            recipient_after: U256::from(5),
        }
    }

    #[test]
    fn test_pass_verdict() {
        let verdict = Verdict::new(1, &Ok(report()));

        assert!(verdict.is_pass());
        assert!(verdict.to_string().starts_with("PASS run 1: "));

        let value = serde_json::to_value(&verdict).unwrap();
        assert_eq!(value["verdict"], json!("pass"));
        assert_eq!(value["run"], json!(1));
        assert_eq!(value["report"]["blockNumber"], json!(9));
        assert_eq!(value["report"]["amount"], json!("0x5"));
    }

    #[test]
    fn test_fail_verdict() {
        let err = ScenarioError::from(Precondition::SenderUnfunded { address: Address::ZERO });
        let verdict = Verdict::new(2, &Err(err));

        assert!(!verdict.is_pass());
        assert_eq!(
            verdict.to_string(),
            "FAIL run 2 [PreconditionFailure]: precondition failed: sender \
             0x0000000000000000000000000000000000000000 holds no balance"
        );

        let value = serde_json::to_value(&verdict).unwrap();
        assert_eq!(value["verdict"], json!("fail"));
        assert_eq!(value["kind"], json!("PreconditionFailure"));
    }
}
